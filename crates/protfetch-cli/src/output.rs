//! Plain-text and JSON rendering of lookup and digest results.

use std::io::{self, Write};

use anyhow::Result;
use protfetch::PeptideTable;

pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(_) => println!("{value}"),
    }
}

/// Response body of the remote failure behind `err`, if any.
pub fn remote_body(err: &anyhow::Error) -> Option<&str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<protfetch::Error>())
        .and_then(protfetch::Error::body)
}

/// `Error: <chain>` plus the remote response body on the following lines.
pub fn error_report(err: &anyhow::Error) -> String {
    let mut report = format!("Error: {err:#}\n");
    if let Some(body) = remote_body(err).filter(|b| !b.trim().is_empty()) {
        report.push_str("Response body:\n");
        report.push_str(body.trim_end());
        report.push('\n');
    }
    report
}

pub fn error_json(err: &anyhow::Error) -> serde_json::Value {
    let mut value = serde_json::json!({
        "error": true,
        "message": format!("{err:#}"),
    });
    if let Some(e) = err.chain().find_map(|c| c.downcast_ref::<protfetch::Error>()) {
        if let Some(status) = e.status() {
            value["status"] = status.into();
        }
        if let Some(body) = e.body() {
            value["body"] = body.into();
        }
    }
    value
}

pub fn print_identifiers(ids: &[String], json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, ids)?;
        writeln!(out)?;
    } else {
        write_lines(&mut out, ids)?;
    }
    Ok(())
}

pub fn print_table(table: &PeptideTable, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, table)?;
        writeln!(out)?;
    } else {
        write_tsv(&mut out, table)?;
    }
    Ok(())
}

fn write_lines<W: Write>(out: &mut W, ids: &[String]) -> io::Result<()> {
    for id in ids {
        writeln!(out, "{id}")?;
    }
    Ok(())
}

/// Header row then one line per record. Tabs and newlines inside cells
/// become spaces so the grid stays rectangular.
fn write_tsv<W: Write>(out: &mut W, table: &PeptideTable) -> io::Result<()> {
    let header: Vec<String> = table.columns().iter().map(|c| tsv_cell(c)).collect();
    writeln!(out, "{}", header.join("\t"))?;
    for record in table {
        let cells: Vec<String> = record.values().map(tsv_cell).collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }
    Ok(())
}

fn tsv_cell(text: &str) -> String {
    text.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_cell_flattens_whitespace() {
        assert_eq!(tsv_cell("a\tb\nc"), "a b c");
        assert_eq!(tsv_cell("1149.6153"), "1149.6153");
    }

    #[test]
    fn test_write_tsv() {
        let page = r#"<table class="type-1">
            <tr><th>mass</th><th>position</th></tr>
            <tr><td>927.4934</td><td>35-41</td></tr>
        </table>"#;
        let table = protfetch::parse_digest_page(page).unwrap();
        let mut buf = Vec::new();
        write_tsv(&mut buf, &table).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "mass\tposition\n927.4934\t35-41\n");
    }

    fn remote_failure(body: &str) -> anyhow::Error {
        let err = protfetch::Error::RemoteRequest {
            url: "https://rest.uniprot.org/uniprotkb/search".to_string(),
            status: 400,
            body: body.to_string(),
        };
        anyhow::Error::new(err).context("lookup of gene X failed")
    }

    #[test]
    fn test_error_report_includes_remote_body() {
        let err = remote_failure("invalid query: gene:(");
        assert_eq!(remote_body(&err), Some("invalid query: gene:("));

        let report = error_report(&err);
        assert!(report.starts_with("Error: lookup of gene X failed: Remote request to"));
        assert!(report.contains("status 400"));
        assert!(report.contains("Response body:\ninvalid query: gene:(\n"));
    }

    #[test]
    fn test_error_report_without_remote_body() {
        let err = anyhow::anyhow!("failed to read PROTFETCH_* settings");
        assert_eq!(remote_body(&err), None);
        assert_eq!(error_report(&err), "Error: failed to read PROTFETCH_* settings\n");
    }

    #[test]
    fn test_error_json_carries_status_and_body() {
        let value = error_json(&remote_failure("bad gene"));
        assert_eq!(value["error"], true);
        assert_eq!(value["status"], 400);
        assert_eq!(value["body"], "bad gene");
        assert!(value["message"].as_str().unwrap().contains("status 400"));
    }

    #[test]
    fn test_write_lines() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &["P12345".to_string(), "Q9Y6K9".to_string()]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "P12345\nQ9Y6K9\n");
    }
}
