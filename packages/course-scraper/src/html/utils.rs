//! Helpers over `scraper` element trees.
//!
//! Banner pages nest tables inside table cells, so most helpers here work on
//! direct children only and never descend into a nested table by accident.

use scraper::{ElementRef, Selector};

/// Compile a selector written into the source.
///
/// # Panics
/// Panics if `css` is not a valid selector. Only call with literals.
#[allow(clippy::expect_used)] // Selectors are string literals checked by tests
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Collapse runs of whitespace (including `&nbsp;`) to single spaces and trim.
///
/// # Examples
/// ```
/// use uvic_course_scraper::html::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  Waitlist\n  Seats\u{a0}"), "Waitlist Seats");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All text below an element, whitespace-normalized.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Check whether an element carries a CSS class.
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Rows belonging directly to a table, in document order.
///
/// Looks through `thead`/`tbody`/`tfoot` wrappers but not into nested tables.
pub fn table_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|row| row.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

/// Header and data cells of a row, in column order.
pub fn row_cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .collect()
}

/// Nearest ancestor element with the given tag name.
pub fn enclosing<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == tag)
}

/// One visual line of a Banner free-form cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Text of a `span.fieldlabeltext`, e.g. `Restrictions:`.
    Label(String),
    /// A run of plain text between tags.
    Text(String),
}

/// Flatten the direct children of a cell into labels and text lines.
///
/// Banner lays out free-form cells as `<span class="fieldlabeltext">` labels
/// followed by text separated with `<br>`. Links, nested tables and other
/// elements are skipped, and blank text runs are dropped.
pub fn labelled_lines(cell: ElementRef<'_>) -> Vec<Line> {
    let mut lines = Vec::new();
    for child in cell.children() {
        if let Some(text) = child.value().as_text() {
            let text = normalize_whitespace(text);
            if !text.is_empty() {
                lines.push(Line::Text(text));
            }
        } else if let Some(element) = ElementRef::wrap(child) {
            if element.value().name() == "span" && has_class(element, "fieldlabeltext") {
                lines.push(Line::Label(element_text(element)));
            }
        }
    }
    lines
}
