use crate::error::Result;
use crate::results::CrawlTree;

/// Sub-heading marks a fragment may contain and how far below the page
/// title each one sits
const SUB_HEADINGS: [(&str, usize); 3] = [("## ", 1), ("### ", 2), ("#### ", 3)];

/// Flattens the crawl tree into one Markdown document.
///
/// Pages are emitted depth-first in discovery order. Each fragment's title
/// heading is re-based to the page's nesting depth and its sub-headings move
/// by the same offset. Pages without content add nothing, but their children
/// are still emitted.
pub fn assemble(tree: &CrawlTree) -> String {
    tree.depth_first()
        .into_iter()
        .filter_map(|(node, depth)| {
            node.content
                .as_deref()
                .filter(|content| !content.is_empty())
                .map(|content| rebase_headings(content, depth))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Rewrites heading marks of a single fragment for a page at `depth`.
///
/// Only a `# ` on the first line counts as the page title. Lines inside
/// fenced code blocks are never touched; a fence only closes on a bare
/// backtick line at least as long as the one that opened it.
pub fn rebase_headings(fragment: &str, depth: usize) -> String {
    let mut open_fence: Option<usize> = None;

    fragment
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let ticks = line.len() - line.trim_start_matches('`').len();
            match open_fence {
                Some(open) => {
                    if ticks >= open && line[ticks..].trim().is_empty() {
                        open_fence = None;
                    }
                    return line.to_string();
                }
                None if ticks >= 3 => {
                    open_fence = Some(ticks);
                    return line.to_string();
                }
                None => {}
            }
            if i == 0 {
                if let Some(title) = line.strip_prefix("# ") {
                    return format!("{} {}", "#".repeat(depth), title);
                }
            }
            for (marks, offset) in SUB_HEADINGS {
                if let Some(text) = line.strip_prefix(marks) {
                    return format!("{} {}", "#".repeat(depth + offset), text);
                }
            }
            line.to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON of the top-level pages and their direct children
pub fn summary_json(tree: &CrawlTree) -> Result<String> {
    Ok(serde_json::to_string_pretty(&tree.summary())?)
}
