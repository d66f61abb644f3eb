use scraper::{ElementRef, Node};

/// Returns true for inline footnote-marker elements (`sup` / `sub`)
pub fn is_footnote_marker(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "sup" | "sub")
}

/// Display text of a cell with every footnote marker removed, trimmed
pub fn cell_text(cell: ElementRef<'_>) -> String {
    let mut text = String::new();
    collect_text(cell, &mut text);
    text.trim().to_string()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    if !is_footnote_marker(&child) {
                        collect_text(child, out);
                    }
                }
            }
            _ => {}
        }
    }
}
