// Re-export modules
pub mod config;
pub mod crawlers;
pub mod document;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::DocCrawlerConfig;
pub use crawlers::fetch::Fetch;
pub use crawlers::http::HttpFetcher;
pub use crawlers::web::DocCrawler;
pub use error::{Error, Result};
pub use results::{CrawlState, CrawlTree, PageNode};

use std::path::{Path, PathBuf};
use std::time::Instant;
use utils::write_text_file;

/// Outcome of a finished crawl
#[derive(Debug)]
pub struct CrawledSite {
    /// Visited set, tree and failed URLs
    pub state: CrawlState,
    /// Assembled Markdown document
    pub document: String,
}

impl CrawledSite {
    /// JSON summary of the top-level pages
    pub fn summary_json(&self) -> Result<String> {
        document::summary_json(&self.state.tree)
    }
}

/// Main builder for turning a documentation site into one Markdown file
#[derive(Debug, Clone, Default)]
pub struct DocSite {
    config: DocCrawlerConfig,
}

impl DocSite {
    /// Create a new builder crawling from `start_url` with default settings
    pub fn new(start_url: &str) -> Self {
        Self {
            config: DocCrawlerConfig::new(start_url),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: DocCrawlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = DocCrawlerConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self> {
        let config = DocCrawlerConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    pub fn with_start_url(mut self, start_url: &str) -> Self {
        self.config.start_url = start_url.to_string();
        self
    }

    /// Override the Markdown output path
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_file = path.into();
        self
    }

    /// Override the JSON summary path
    pub fn with_summary_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.summary_file = path.into();
        self
    }

    pub fn config(&self) -> &DocCrawlerConfig {
        &self.config
    }

    /// Crawl the site through `fetcher` and assemble the document
    pub async fn generate<F: Fetch>(&self, fetcher: F) -> Result<CrawledSite> {
        let start_url = self.config.start_url()?;
        let crawler = DocCrawler::from_config(fetcher, &self.config)?;
        let mut state = CrawlState::new();

        ::log::info!("Starting recursive crawl of {}", start_url);
        let started = Instant::now();
        crawler.crawl(&start_url, &mut state, None).await;
        ::log::info!(
            "Crawl complete - visited {} pages ({} failed) in {:.2} seconds",
            state.visited.len(),
            state.failed.len(),
            started.elapsed().as_secs_f64()
        );

        ::log::info!("Generating Markdown document");
        let document = document::assemble(&state.tree);
        Ok(CrawledSite { state, document })
    }

    /// Crawl the site over HTTP using the configured user agent
    pub async fn generate_http(&self) -> Result<CrawledSite> {
        let fetcher = HttpFetcher::from_config(&self.config)?;
        self.generate(fetcher).await
    }

    /// Write the document and the JSON summary to the configured paths
    pub fn write_outputs(&self, site: &CrawledSite) -> Result<()> {
        write_text_file(&self.config.output_file, &site.document)?;
        ::log::info!("Document saved to {}", self.config.output_file.display());

        write_text_file(&self.config.summary_file, &site.summary_json()?)?;
        ::log::info!("Structure saved to {}", self.config.summary_file.display());
        Ok(())
    }
}
