use crate::error::ExtractError;
use crate::parsers::list::list_to_markdown;
use crate::parsers::selector;
use crate::parsers::table::table_to_markdown;
use crate::parsers::text::{element_text, has_content, raw_text};
use scraper::{ElementRef, Html};

/// Candidate content regions, most specific first
pub const CONTENT_SELECTORS: [&str; 6] = [
    "div.doc-content",
    "div.content",
    "div#content",
    "article",
    "main",
    "body",
];

/// Candidate page titles, most specific first
pub const TITLE_SELECTORS: [&str; 3] = ["h1.doc-title", "h1", "title"];

/// A structural element of the content region that has a Markdown rendering
#[derive(Debug, Clone, Copy)]
pub enum Block<'a> {
    Heading { level: usize, element: ElementRef<'a> },
    Paragraph(ElementRef<'a>),
    Code(ElementRef<'a>),
    Table(ElementRef<'a>),
    List(ElementRef<'a>),
}

impl<'a> Block<'a> {
    pub fn classify(element: ElementRef<'a>) -> Option<Self> {
        let block = match element.value().name() {
            "h2" => Block::Heading { level: 2, element },
            "h3" => Block::Heading { level: 3, element },
            "h4" => Block::Heading { level: 4, element },
            "p" => Block::Paragraph(element),
            "pre" => Block::Code(element),
            "table" => Block::Table(element),
            "ul" | "ol" => Block::List(element),
            _ => return None,
        };
        Some(block)
    }

    /// Markdown for this block, or None when it has no text
    pub fn render(&self, code_language: &str) -> Option<String> {
        match *self {
            Block::Heading { level, element } => {
                let text = element_text(element);
                (!text.is_empty()).then(|| format!("\n{} {}\n", "#".repeat(level), text))
            }
            Block::Paragraph(element) => {
                let text = element_text(element);
                (!text.is_empty()).then(|| format!("{text}\n"))
            }
            Block::Code(element) => {
                let code = raw_text(element);
                let fence = code_fence(&code);
                Some(format!("{fence}{code_language}\n{code}\n{fence}\n"))
            }
            Block::Table(element) => Some(table_to_markdown(element)),
            Block::List(element) => Some(list_to_markdown(element)),
        }
    }
}

/// Backtick fence longer than any backtick run inside `code`, at least three
fn code_fence(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Turns a documentation page into a Markdown fragment
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    code_language: String,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new("python")
    }
}

impl ContentExtractor {
    pub fn new(code_language: &str) -> Self {
        Self {
            code_language: code_language.to_string(),
        }
    }

    /// Parses `html` and converts its content region into Markdown
    pub fn extract(&self, html: &str, source_url: Option<&str>) -> Result<String, ExtractError> {
        let doc = Html::parse_document(html);
        self.extract_document(&doc, source_url)
    }

    /// Same as [`ContentExtractor::extract`] for an already parsed document
    pub fn extract_document(
        &self,
        doc: &Html,
        source_url: Option<&str>,
    ) -> Result<String, ExtractError> {
        ::log::debug!("Analyzing page structure {}", source_url.unwrap_or(""));

        let region = find_content_region(doc).ok_or(ExtractError::NoContentRegion)?;
        let mut parts = Vec::new();

        match find_title(doc) {
            Some(title) => parts.push(format!("# {title}\n")),
            None => ::log::warn!("No title found {}", source_url.unwrap_or("")),
        }

        parts.extend(
            collect_blocks(region)
                .iter()
                .filter_map(|block| block.render(&self.code_language)),
        );

        Ok(parts.join("\n"))
    }
}

/// Walks the selector fallback chain and returns the first matching region.
///
/// The parser always synthesizes a `<body>`, so the final fallback only counts
/// when the body actually holds something.
pub fn find_content_region(doc: &Html) -> Option<ElementRef<'_>> {
    for css in CONTENT_SELECTORS {
        match doc.select(&selector(css)).next() {
            Some(region) if css != "body" || has_content(region) => {
                ::log::debug!(
                    "Found content region: {} {:?}",
                    region.value().name(),
                    region.value().classes().collect::<Vec<_>>()
                );
                return Some(region);
            }
            _ => ::log::debug!("No match for {}, trying next selector", css),
        }
    }
    ::log::warn!("Could not find any content region");
    None
}

/// First non-empty title candidate
pub fn find_title(doc: &Html) -> Option<String> {
    TITLE_SELECTORS.iter().find_map(|css| {
        doc.select(&selector(css))
            .map(element_text)
            .find(|text| !text.is_empty())
    })
}

/// Renderable blocks below `region` in document order. A rendered block
/// consumes its subtree; other elements are descended into.
pub fn collect_blocks(region: ElementRef<'_>) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut stack: Vec<ElementRef> = region
        .children()
        .filter_map(ElementRef::wrap)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    while let Some(element) = stack.pop() {
        match Block::classify(element) {
            Some(block) => blocks.push(block),
            None => stack.extend(
                element
                    .children()
                    .filter_map(ElementRef::wrap)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev(),
            ),
        }
    }

    blocks
}
