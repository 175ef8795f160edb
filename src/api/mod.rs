pub mod client;

pub use client::NewsClient;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{ArticlePage, Category};

/// Page size the search endpoint always requests.
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Optional filters for a top-headlines request. Unset fields are omitted
/// from the outgoing query string entirely.
#[derive(Debug, Clone, Default)]
pub struct HeadlineFilters {
    pub country: Option<String>,
    pub category: Option<Category>,
    pub q: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// The two read operations the news provider exposes.
#[async_trait]
pub trait NewsApi {
    /// Curated top articles, optionally filtered by country/category.
    async fn top_headlines(&self, filters: &HeadlineFilters) -> Result<ArticlePage>;

    /// Full-text query against all indexed articles, newest first.
    async fn search_news(&self, query: &str, page: u32) -> Result<ArticlePage>;
}
