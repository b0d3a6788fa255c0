use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Browser string sent with every request; some documentation hosts refuse
/// unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for a documentation crawl
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocCrawlerConfig {
    /// URL to start crawling from
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// Site origin; absolute links are only followed on this host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Only hrefs under this path are followed
    #[serde(default = "default_link_prefix")]
    pub link_prefix: String,

    /// Regex patterns for resolved URLs that must not be followed
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Drop `#fragment` parts before deduplicating URLs
    #[serde(default = "default_strip_fragments")]
    pub strip_fragments: bool,

    /// Language tag written on every fenced code block
    #[serde(default = "default_code_language")]
    pub code_language: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout; the transport default applies when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Assembled Markdown document
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// JSON summary of the top-level pages
    #[serde(default = "default_summary_file")]
    pub summary_file: PathBuf,

    /// Where raw HTML goes when no content region is found; `null` disables it
    #[serde(default = "default_debug_dump_file")]
    pub debug_dump_file: Option<PathBuf>,
}

fn default_start_url() -> String {
    "https://tushare.pro/document/2".to_string()
}

fn default_base_url() -> String {
    "https://tushare.pro".to_string()
}

fn default_link_prefix() -> String {
    "/document/".to_string()
}

fn default_strip_fragments() -> bool {
    true
}

fn default_code_language() -> String {
    "python".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_output_file() -> PathBuf {
    PathBuf::from("tushare_full_doc.md")
}

fn default_summary_file() -> PathBuf {
    PathBuf::from("tushare_structure.json")
}

fn default_debug_dump_file() -> Option<PathBuf> {
    Some(PathBuf::from("debug_page.html"))
}

impl Default for DocCrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: default_start_url(),
            base_url: default_base_url(),
            link_prefix: default_link_prefix(),
            exclude_patterns: Vec::new(),
            strip_fragments: default_strip_fragments(),
            code_language: default_code_language(),
            user_agent: default_user_agent(),
            request_timeout_secs: None,
            output_file: default_output_file(),
            summary_file: default_summary_file(),
            debug_dump_file: default_debug_dump_file(),
        }
    }
}

impl DocCrawlerConfig {
    /// Create a configuration with default values for the given start URL
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn start_url(&self) -> Result<Url> {
        parse_url(&self.start_url)
    }

    pub fn base_url(&self) -> Result<Url> {
        parse_url(&self.base_url)
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| Error::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}
