//! HTML results-table extraction.
//!
//! The one place that knows how a marker-classed `<table>` is laid out:
//! first row is the header, every later row is data. Cell text is kept
//! exactly as it appears in the document.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

const CONTEXT: &str = "HTML results table";

/// Header and row cell texts of one HTML table, untyped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Find the first `<table>` carrying `marker_class` and read its cells.
///
/// Fails with [`Error::MalformedResponse`] when no such table exists or it
/// has no rows at all.
pub fn extract_table(document: &Html, marker_class: &str) -> Result<RawTable> {
    let table_sel = Selector::parse("table").expect("table selector is valid");
    let row_sel = Selector::parse("tr").expect("row selector is valid");

    let mut tables = document
        .select(&table_sel)
        .filter(|t| t.value().classes().any(|c| c == marker_class));

    let table = tables.next().ok_or_else(|| {
        Error::malformed(CONTEXT, format!("no <table class=\"{marker_class}\"> in document"))
    })?;
    if tables.next().is_some() {
        tracing::debug!(marker_class, "several marker tables found, using the first");
    }

    let mut rows = table.select(&row_sel).map(|row| row_cells(&row));

    let header = rows
        .next()
        .ok_or_else(|| Error::malformed(CONTEXT, "results table has no header row"))?;

    Ok(RawTable {
        header,
        rows: rows.collect(),
    })
}

/// Parse `html` and extract the marker table in one step.
pub fn extract_table_from_html(html: &str, marker_class: &str) -> Result<RawTable> {
    let document = Html::parse_document(html);
    extract_table(&document, marker_class)
}

/// Text of each direct `<th>`/`<td>` child of a row.
fn row_cells(row: &ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "th" | "td"))
        .map(|cell| cell.text().collect::<String>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <table class="layout"><tr><td>navigation</td></tr></table>
          <table class="wide type-1">
            <tr><th>mass</th><th>position</th></tr>
            <tr><td>1001.5</td><td>3-11</td></tr>
            <tr><td><b>2002</b>.25</td><td>12-30</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_extracts_marker_table_only() {
        let table = extract_table_from_html(PAGE, "type-1").unwrap();
        assert_eq!(table.header, vec!["mass", "position"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["1001.5".to_string(), "3-11".to_string()],
                vec!["2002.25".to_string(), "12-30".to_string()],
            ]
        );
    }

    #[test]
    fn test_tbody_rows_are_found() {
        let html = r#"<table class="type-1"><thead><tr><th>a</th></tr></thead>
                      <tbody><tr><td>x</td></tr></tbody></table>"#;
        let table = extract_table_from_html(html, "type-1").unwrap();
        assert_eq!(table.header, vec!["a"]);
        assert_eq!(table.rows, vec![vec!["x".to_string()]]);
    }

    #[test]
    fn test_cell_text_is_not_trimmed() {
        let html = r#"<table class="type-1"><tr><th> mass </th></tr></table>"#;
        let table = extract_table_from_html(html, "type-1").unwrap();
        assert_eq!(table.header, vec![" mass "]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_missing_marker_is_malformed() {
        let err = extract_table_from_html(PAGE, "type-2").unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn test_empty_marker_table_is_malformed() {
        let html = r#"<table class="type-1"></table>"#;
        let err = extract_table_from_html(html, "type-1").unwrap_err();
        assert!(err.is_malformed_response());
    }
}
