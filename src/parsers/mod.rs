pub mod html;
pub mod links;
pub mod list;
pub mod table;
pub mod text;

#[cfg(test)]
mod tests;

use crate::error::ExtractError;
use crate::filter::LinkFilter;
use crate::utils::title_from_url;
use html::ContentExtractor;
use links::Link;
use scraper::{Html, Selector};
use url::Url;

/// Compiles a selector from a string literal known to be valid
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector should parse")
}

/// Everything the crawler needs from one page
#[derive(Debug)]
pub struct ParsedPage {
    /// Display title: heading, `<title>`, or the last URL segment
    pub title: String,
    /// Markdown fragment, or the reason none could be produced
    pub content: Result<String, ExtractError>,
    /// Documentation links in document order
    pub links: Vec<Link>,
}

/// Parses a fetched page once and derives title, content and links from it
#[derive(Debug)]
pub struct Parser {
    extractor: ContentExtractor,
    filter: LinkFilter,
}

impl Parser {
    pub fn new(extractor: ContentExtractor, filter: LinkFilter) -> Self {
        Self { extractor, filter }
    }

    pub fn filter(&self) -> &LinkFilter {
        &self.filter
    }

    pub fn parse(&self, html: &str, url: &Url) -> ParsedPage {
        let doc = Html::parse_document(html);

        let title = html::find_title(&doc).unwrap_or_else(|| title_from_url(url));
        let links = links::extract_links_from(&doc, url, &self.filter);
        let content = self.extractor.extract_document(&doc, Some(url.as_str()));

        ParsedPage {
            title,
            content,
            links,
        }
    }
}
