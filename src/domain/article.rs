use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an article came from, as reported by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: String,
}

/// A single article as returned by the news provider.
///
/// Immutable once fetched. List identity is `(url, position)`: the provider
/// does not guarantee globally unique URLs across pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub content: Option<String>,
}

impl Article {
    pub fn display_source(&self) -> &str {
        if self.source.name.is_empty() {
            "(unknown)"
        } else {
            &self.source.name
        }
    }

    /// Article body with the provider's trailing truncation marker removed.
    pub fn display_content(&self) -> Option<&str> {
        self.content.as_deref().map(strip_truncation_marker)
    }
}

/// One page of the provider's list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub status: String,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Strip a trailing `[+<digits> chars]` marker the provider appends when it
/// truncates `content`. Anything that does not match exactly is left alone.
pub fn strip_truncation_marker(content: &str) -> &str {
    let trimmed = content.trim_end();
    let Some(rest) = trimmed.strip_suffix(" chars]") else {
        return content;
    };
    let Some(open) = rest.rfind("[+") else {
        return content;
    };
    let digits = &rest[open + 2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return content;
    }
    trimmed[..open].trim_end()
}
