use crate::config::DocCrawlerConfig;
use crate::error::Result;
use regex::Regex;
use url::Url;

/// Configuration for deciding which anchors lead to documentation pages
#[derive(Debug, Clone)]
pub struct LinkFilterConfig {
    /// Path prefix every followed link must start with
    pub href_prefix: String,

    /// Host absolute links must point at (if None, absolute links are never followed)
    pub required_host: Option<String>,

    /// Regex patterns for resolved URLs to exclude
    pub exclude_patterns: Vec<String>,

    /// Whether `#fragment` parts are removed from resolved URLs
    pub strip_fragments: bool,
}

impl Default for LinkFilterConfig {
    fn default() -> Self {
        Self {
            href_prefix: "/document/".to_string(),
            required_host: None,
            exclude_patterns: Vec::new(),
            strip_fragments: true,
        }
    }
}

/// Same-site, path-scoped link filter
#[derive(Debug)]
pub struct LinkFilter {
    config: LinkFilterConfig,
    exclude_regexes: Vec<Regex>,
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self {
            config: LinkFilterConfig::default(),
            exclude_regexes: Vec::new(),
        }
    }
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: LinkFilterConfig) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            config,
            exclude_regexes,
        })
    }

    /// Build the filter for a crawl: prefix and exclusions from the config,
    /// host taken from the configured base URL
    pub fn from_crawler_config(config: &DocCrawlerConfig) -> Result<Self> {
        let base = config.base_url()?;
        let filter = Self::new(LinkFilterConfig {
            href_prefix: config.link_prefix.clone(),
            required_host: base.host_str().map(|h| h.to_string()),
            exclude_patterns: config.exclude_patterns.clone(),
            strip_fragments: config.strip_fragments,
        })?;
        Ok(filter)
    }

    /// Resolve an href found on the page at `base` into the URL to crawl,
    /// or None when the link is not a documentation link
    pub fn resolve(&self, href: &str, base: &Url) -> Option<Url> {
        let href = href.trim();

        let resolved = if href.starts_with(&self.config.href_prefix) {
            base.join(href).ok()?
        } else {
            // Relative hrefs without a base fail to parse here and are dropped.
            let absolute = Url::parse(href).ok()?;
            if !matches!(absolute.scheme(), "http" | "https")
                || !self.is_in_host_scope(&absolute)
                || !absolute.path().starts_with(&self.config.href_prefix)
            {
                return None;
            }
            absolute
        };

        let url_str = resolved.as_str();
        if self.exclude_regexes.iter().any(|re| re.is_match(url_str)) {
            ::log::debug!("Link excluded by pattern: {}", url_str);
            return None;
        }

        Some(self.normalize_url(&resolved))
    }

    fn is_in_host_scope(&self, url: &Url) -> bool {
        match (&self.config.required_host, url.host_str()) {
            (Some(required), Some(host)) => host == required,
            _ => false,
        }
    }

    /// Create a normalized version of the URL (fragment removed when configured)
    pub fn normalize_url(&self, url: &Url) -> Url {
        let mut normalized = url.clone();
        if self.config.strip_fragments {
            normalized.set_fragment(None);
        }
        normalized
    }
}
