use crate::parsers::text::{element_text_excluding, indent_block};
use scraper::ElementRef;

/// Indentation applied to a nested list under its parent item
pub const INDENT: &str = "    ";

const LIST_TAGS: [&str; 2] = ["ul", "ol"];

/// Converts a `<ul>` or `<ol>` element into Markdown list lines.
///
/// Ordered items are numbered by position among the direct `<li>` children;
/// `start` and `value` attributes are ignored. Lists nested directly inside
/// an item are rendered below it, indented by [`INDENT`]; lists buried
/// deeper are kept as part of the item text.
pub fn list_to_markdown(list: ElementRef) -> String {
    let mut out = render_list(list);
    out.push('\n');
    out
}

fn render_list(list: ElementRef) -> String {
    let ordered = list.value().name() == "ol";
    let mut lines = Vec::new();

    let items = list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li");

    for (i, item) in items.enumerate() {
        let prefix = if ordered {
            format!("{}.", i + 1)
        } else {
            "-".to_string()
        };
        let text = element_text_excluding(item, &LIST_TAGS);
        lines.push(format!("{prefix} {text}").trim_end().to_string());

        let nested = item
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| LIST_TAGS.contains(&child.value().name()));
        for sublist in nested {
            let block = render_list(sublist);
            if !block.is_empty() {
                lines.push(indent_block(&block, INDENT));
            }
        }
    }

    lines.join("\n")
}
