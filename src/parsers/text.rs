use scraper::ElementRef;
use scraper::node::Node;

/// Normalizes whitespace within a single line or paragraph
pub fn normalize_whitespace_in_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All text below an element, concatenated as written and with whitespace
/// collapsed to single spaces
pub fn element_text(element: ElementRef) -> String {
    let raw = element.text().collect::<String>();
    normalize_whitespace_in_segment(&raw)
}

/// Text below an element, leaving out direct children whose tag is in
/// `skip`. Deeper elements with those tags still contribute their text.
pub fn element_text_excluding(element: ElementRef, skip: &[&str]) -> String {
    let mut raw = String::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(el) if !skip.contains(&el.name()) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    raw.extend(child_el.text());
                }
            }
            _ => {}
        }
    }
    normalize_whitespace_in_segment(&raw)
}

/// Trimmed raw text, used where whitespace is significant (code blocks)
pub fn raw_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Whether an element holds anything worth converting
pub fn has_content(element: ElementRef) -> bool {
    element.children().any(|child| match child.value() {
        Node::Element(_) => true,
        Node::Text(text) => !text.trim().is_empty(),
        _ => false,
    })
}

/// Indent every line of a block by `indent`
pub fn indent_block(block: &str, indent: &str) -> String {
    block
        .lines()
        .map(|line| format!("{indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
