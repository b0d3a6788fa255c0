use crate::error::FetchError;
use std::collections::HashMap;
use std::future::Future;
use url::Url;

/// Retrieves the HTML of a page
pub trait Fetch {
    /// Fetches `url`, failing on transport errors and non-2xx responses
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Serves pages from memory; URLs without an entry fail with status 404.
///
/// Useful for exercising a crawl without a network.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Result<String, FetchError>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    pub fn with_failure(mut self, url: &str, error: FetchError) -> Self {
        self.pages.insert(url.to_string(), Err(error));
        self
    }
}

impl Fetch for StaticFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.pages
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
            })
    }
}
