use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::api::{HeadlineFilters, NewsApi, SEARCH_PAGE_SIZE};
use crate::app::{NewsError, Result};
use crate::config::Config;
use crate::domain::ArticlePage;

const NETWORK_ERROR_HEADLINES: &str = "network error loading news";
const NETWORK_ERROR_SEARCH: &str = "network error searching news";

/// Failure payload the provider returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    status: String,
    code: String,
    message: String,
}

/// reqwest-backed [`NewsApi`] implementation.
///
/// Performs no retries; retry is the caller's decision.
pub struct NewsClient {
    client: Client,
    base_url: Url,
    default_country: String,
    default_page_size: u32,
}

impl NewsClient {
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(NewsError::Config(
                "api_key is not set; edit the config file and add your key".into(),
            ));
        }

        let base_url = Url::parse(&config.base_url)?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|_| NewsError::Config("api_key contains invalid characters".into()))?;
        headers.insert("X-Api-Key", key);

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("gazette/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            client,
            base_url,
            default_country: config.country.clone(),
            default_page_size: config.page_size,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Issue a GET and normalize failures: a structured provider payload is
    /// surfaced unchanged, anything without a response becomes the fixed
    /// per-endpoint network message.
    async fn get_page(
        &self,
        path: &str,
        params: &[(&'static str, String)],
        network_message: &str,
    ) -> Result<ArticlePage> {
        let url = self.endpoint(path);
        tracing::debug!(%url, ?params, "requesting page");

        let response = match self.client.get(&url).query(params).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, %url, "no response from provider");
                return Err(NewsError::Network(network_message.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(payload) => NewsError::RemoteApi {
                    status: payload.status,
                    code: payload.code,
                    message: payload.message,
                },
                // A response WAS received, so this still counts as a
                // provider failure rather than a network one.
                Err(_) => NewsError::RemoteApi {
                    status: "error".into(),
                    code: "httpError".into(),
                    message: format!("news provider returned HTTP {status}"),
                },
            });
        }

        match response.json::<ArticlePage>().await {
            Ok(page) => Ok(page),
            Err(e) => {
                tracing::debug!(error = %e, %url, "undecodable response body");
                Err(NewsError::Network(network_message.to_string()))
            }
        }
    }
}

#[async_trait]
impl NewsApi for NewsClient {
    async fn top_headlines(&self, filters: &HeadlineFilters) -> Result<ArticlePage> {
        let params = headline_params(filters, &self.default_country, self.default_page_size);
        self.get_page("top-headlines", &params, NETWORK_ERROR_HEADLINES)
            .await
    }

    async fn search_news(&self, query: &str, page: u32) -> Result<ArticlePage> {
        let params = search_params(query, page);
        self.get_page("everything", &params, NETWORK_ERROR_SEARCH)
            .await
    }
}

/// Query parameters for `/top-headlines`. Defaults apply for country, page
/// and pageSize; fields the caller left unset are omitted, never sent as a
/// literal placeholder.
fn headline_params(
    filters: &HeadlineFilters,
    default_country: &str,
    default_page_size: u32,
) -> Vec<(&'static str, String)> {
    let mut params = vec![(
        "country",
        filters
            .country
            .clone()
            .unwrap_or_else(|| default_country.to_string()),
    )];
    if let Some(category) = filters.category {
        params.push(("category", category.as_str().to_string()));
    }
    if let Some(q) = &filters.q {
        params.push(("q", q.clone()));
    }
    params.push(("page", filters.page.unwrap_or(1).to_string()));
    params.push(("pageSize", filters.page_size.unwrap_or(default_page_size).to_string()));
    params
}

/// Query parameters for `/everything`: fixed page size, newest first. The
/// query goes out verbatim; trimming is the caller's job.
fn search_params(query: &str, page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("q", query.to_string()),
        ("page", page.to_string()),
        ("pageSize", SEARCH_PAGE_SIZE.to_string()),
        ("sortBy", "publishedAt".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn keys(params: &[(&'static str, String)]) -> Vec<&'static str> {
        params.iter().map(|(k, _)| *k).collect()
    }

    fn value<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_headline_defaults() {
        let params = headline_params(&HeadlineFilters::default(), "us", 10);

        assert_eq!(keys(&params), vec!["country", "page", "pageSize"]);
        assert_eq!(value(&params, "country"), Some("us"));
        assert_eq!(value(&params, "page"), Some("1"));
        assert_eq!(value(&params, "pageSize"), Some("10"));
    }

    #[test]
    fn test_unset_filters_are_omitted_not_placeholder() {
        let params = headline_params(&HeadlineFilters::default(), "us", 10);

        assert!(value(&params, "category").is_none());
        assert!(value(&params, "q").is_none());
        assert!(params.iter().all(|(_, v)| v != "undefined" && !v.is_empty()));
    }

    #[test]
    fn test_headline_filters_all_set() {
        let filters = HeadlineFilters {
            country: Some("gb".into()),
            category: Some(Category::Technology),
            q: Some("rust".into()),
            page: Some(4),
            page_size: Some(25),
        };
        let params = headline_params(&filters, "us", 10);

        assert_eq!(value(&params, "country"), Some("gb"));
        assert_eq!(value(&params, "category"), Some("technology"));
        assert_eq!(value(&params, "q"), Some("rust"));
        assert_eq!(value(&params, "page"), Some("4"));
        assert_eq!(value(&params, "pageSize"), Some("25"));
    }

    #[test]
    fn test_search_params_shape() {
        let params = search_params("bitcoin", 3);

        assert_eq!(keys(&params), vec!["q", "page", "pageSize", "sortBy"]);
        assert_eq!(value(&params, "q"), Some("bitcoin"));
        assert_eq!(value(&params, "page"), Some("3"));
        assert_eq!(value(&params, "pageSize"), Some("10"));
        assert_eq!(value(&params, "sortBy"), Some("publishedAt"));
    }

    #[test]
    fn test_search_query_sent_verbatim() {
        let params = search_params("  spaced query ", 1);
        assert_eq!(value(&params, "q"), Some("  spaced query "));
    }

    #[test]
    fn test_error_body_parses_provider_payload() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid or incorrect."}"#;
        let payload: ApiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(payload.status, "error");
        assert_eq!(payload.code, "apiKeyInvalid");
        assert_eq!(payload.message, "Your API key is invalid or incorrect.");
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = Config::default();
        match NewsClient::new(&config) {
            Err(NewsError::Config(_)) => {}
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_endpoint_joins_base_path() {
        let config = Config {
            api_key: "k".into(),
            ..Config::default()
        };
        let client = NewsClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("top-headlines"),
            "https://newsapi.org/v2/top-headlines"
        );
    }
}
