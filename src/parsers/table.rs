use crate::parsers::selector;
use crate::parsers::text::element_text;
use scraper::ElementRef;

/// Converts a `<table>` element into a Markdown table.
///
/// The header row comes from `<thead>` when present, otherwise from a first
/// row containing `<th>` cells. Tables without either get no header and no
/// separator line. Rows are emitted as-is, so ragged tables stay ragged.
pub fn table_to_markdown(table: ElementRef) -> String {
    let rows = own_rows(table);
    let mut lines = Vec::new();

    let header_index = rows
        .iter()
        .position(|row| parent_is(*row, "thead") && !cells(*row).is_empty())
        .or_else(|| {
            rows.first()
                .filter(|row| cells(**row).iter().any(|c| c.value().name() == "th"))
                .map(|_| 0)
        });

    if let Some(index) = header_index {
        let headers = cell_texts(rows[index]);
        lines.push(render_row(&headers));
        lines.push(render_row(&vec!["---".to_string(); headers.len()]));
    }

    for (i, row) in rows.iter().enumerate() {
        if Some(i) == header_index {
            continue;
        }
        let texts = cell_texts(*row);
        if !texts.is_empty() {
            lines.push(render_row(&texts));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Rows belonging to this table, skipping rows of nested tables
fn own_rows(table: ElementRef) -> Vec<ElementRef> {
    let tr = selector("tr");
    table
        .select(&tr)
        .filter(|row| {
            row.ancestors()
                .find(|n| n.value().as_element().is_some_and(|e| e.name() == "table"))
                .map(|n| n.id())
                == Some(table.id())
        })
        .collect()
}

fn parent_is(element: ElementRef, name: &str) -> bool {
    element
        .parent()
        .and_then(|p| p.value().as_element().map(|e| e.name() == name))
        .unwrap_or(false)
}

fn cells(row: ElementRef) -> Vec<ElementRef> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "th" | "td"))
        .collect()
}

fn cell_texts(row: ElementRef) -> Vec<String> {
    cells(row)
        .into_iter()
        .map(|cell| element_text(cell).replace('|', "\\|"))
        .collect()
}

fn render_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}
