use crate::api::HeadlineFilters;
use crate::app::{AppContext, Result};
use crate::domain::{Article, Category};

pub async fn headlines(
    ctx: &AppContext,
    category: Option<Category>,
    country: Option<String>,
    page: u32,
) -> Result<()> {
    let filters = HeadlineFilters {
        country,
        category,
        page: Some(page),
        ..HeadlineFilters::default()
    };
    let fetched = ctx.client.top_headlines(&filters).await?;

    if fetched.articles.is_empty() {
        println!("No headlines");
        return Ok(());
    }

    println!(
        "Page {} of {} total results",
        page, fetched.total_results
    );
    for article in &fetched.articles {
        print_article(article);
    }
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str, page: u32) -> Result<()> {
    let fetched = ctx.client.search_news(query.trim(), page).await?;

    if fetched.articles.is_empty() {
        println!("No results for '{}'", query.trim());
        return Ok(());
    }

    println!(
        "Page {} of {} results for '{}'",
        page,
        fetched.total_results,
        query.trim()
    );
    for article in &fetched.articles {
        print_article(article);
    }
    Ok(())
}

fn print_article(article: &Article) {
    let date = article
        .published_at
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "----------".to_string());
    println!("  {}  [{}] {}", date, article.display_source(), article.title);
    println!("      {}", article.url);
}
