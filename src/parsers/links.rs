use crate::filter::LinkFilter;
use crate::parsers::selector;
use crate::parsers::text::element_text;
use scraper::Html;
use url::Url;

/// A documentation link discovered on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: Url,
    pub title: String,
}

/// Parses `html` and returns its documentation links in document order
pub fn extract_links(html: &str, base_url: &Url, filter: &LinkFilter) -> Vec<Link> {
    let doc = Html::parse_document(html);
    extract_links_from(&doc, base_url, filter)
}

/// Same as [`extract_links`] for an already parsed document. Duplicates are kept.
pub fn extract_links_from(doc: &Html, base_url: &Url, filter: &LinkFilter) -> Vec<Link> {
    let anchors = selector("a[href]");
    let links: Vec<Link> = doc
        .select(&anchors)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let url = filter.resolve(href, base_url)?;
            let title = element_text(anchor);
            if title.is_empty() {
                ::log::trace!("Skipping untitled link: {}", url);
                return None;
            }
            Some(Link { url, title })
        })
        .collect();

    ::log::debug!("Found {} documentation links in {}", links.len(), base_url);
    links
}
