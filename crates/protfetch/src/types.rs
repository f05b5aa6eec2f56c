//! Peptide result data model.
//!
//! Columns are whatever the remote results table currently returns
//! (usually mass, position and sequence), so records are keyed by header
//! text rather than fixed fields.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One row of the results table, as `(column, cell text)` pairs in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeptideRecord {
    fields: Vec<(String, String)>,
}

impl PeptideRecord {
    pub(crate) fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Cell text for `column`; the first match wins on duplicate headers.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Cell texts in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Serializes as a JSON object in column order. A repeated header gets a
/// `_2`, `_3`, ... suffix on its later occurrences so no value is lost to a
/// duplicate key.
impl Serialize for PeptideRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, (_, value)) in unique_keys(&self.fields).iter().zip(&self.fields) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn unique_keys(fields: &[(String, String)]) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
    fields
        .iter()
        .map(|(name, _)| {
            let n = seen.iter().filter(|s| **s == name.as_str()).count() + 1;
            seen.push(name);
            if n == 1 {
                name.clone()
            } else {
                format!("{name}_{n}")
            }
        })
        .collect()
}

/// Ordered peptide records sharing one column set, in remote row order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeptideTable {
    columns: Vec<String>,
    records: Vec<PeptideRecord>,
}

impl PeptideTable {
    pub(crate) fn new(columns: Vec<String>, records: Vec<PeptideRecord>) -> Self {
        Self { columns, records }
    }

    /// Column names exactly as extracted from the header row.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[PeptideRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(
            self.records
                .iter()
                .map(|r| r.fields[idx].1.as_str())
                .collect(),
        )
    }
}

impl Serialize for PeptideTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a PeptideTable {
    type Item = &'a PeptideRecord;
    type IntoIter = std::slice::Iter<'a, PeptideRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
