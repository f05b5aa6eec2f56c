//! In-silico digestion through the Expasy PeptideMass service.
//!
//! Masses and cleavage are computed remotely; this module only builds the
//! request and reads the `type-1` results table out of the returned page.

use scraper::Html;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::HttpRequester;
use crate::table::{extract_table, RawTable};
use crate::types::{PeptideRecord, PeptideTable};

/// CSS class of the results table on the PeptideMass page.
pub const RESULTS_TABLE_CLASS: &str = "type-1";

pub const DEFAULT_MIN_MASS: f64 = 500.0;
pub const DEFAULT_MAX_MASS: f64 = 3500.0;
pub const DEFAULT_ENZYME: &str = "Trypsin";

const REAGENTS_NONE: &str = "nothing+(in+reduced+form)";
const CONTEXT: &str = "PeptideMass";

/// Parameters of one digestion request.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestRequest {
    /// UniProt accession or entry name understood by PeptideMass.
    pub protein: String,
    pub min_mass: f64,
    pub max_mass: f64,
    pub enzyme: String,
}

impl DigestRequest {
    pub fn new(protein: impl Into<String>) -> Self {
        Self {
            protein: protein.into(),
            min_mass: DEFAULT_MIN_MASS,
            max_mass: DEFAULT_MAX_MASS,
            enzyme: DEFAULT_ENZYME.to_string(),
        }
    }

    pub fn mass_range(mut self, min_mass: f64, max_mass: f64) -> Self {
        self.min_mass = min_mass;
        self.max_mass = max_mass;
        self
    }

    pub fn enzyme(mut self, enzyme: impl Into<String>) -> Self {
        self.enzyme = enzyme.into();
        self
    }

    /// Query parameters sent to PeptideMass.
    ///
    /// Unreduced cysteines, `[M+H]+` monoisotopic masses, no missed
    /// cleavages, results ordered by mass.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("protein", self.protein.clone()),
            ("reagents", REAGENTS_NONE.to_string()),
            ("mplus", "mh".to_string()),
            ("masses", "monoisotopic".to_string()),
            ("enzyme", self.enzyme.clone()),
            ("MC", "0".to_string()),
            ("minmass", self.min_mass.to_string()),
            ("maxmass", self.max_mass.to_string()),
            ("order", "mass".to_string()),
        ]
    }
}

/// Client for the PeptideMass digestion service.
#[derive(Debug, Clone)]
pub struct PeptideMassClient {
    http: HttpRequester,
    url: String,
}

impl PeptideMassClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_requester(HttpRequester::new(config)?, config))
    }

    pub fn with_requester(http: HttpRequester, config: &ClientConfig) -> Self {
        Self {
            http,
            url: config.peptide_mass_url.clone(),
        }
    }

    /// Digest one protein and return the predicted peptides in mass order.
    pub async fn digest(&self, request: &DigestRequest) -> Result<PeptideTable> {
        let params = request.query_params();
        let resp = self.http.get(&self.url, &params, &[]).await?;

        let table = parse_digest_page(&resp.body)?;
        tracing::debug!(
            protein = %request.protein,
            peptides = table.len(),
            "parsed PeptideMass results"
        );
        Ok(table)
    }
}

/// Read the results table out of a PeptideMass HTML page.
pub fn parse_digest_page(html: &str) -> Result<PeptideTable> {
    let document = Html::parse_document(html);
    let raw = extract_table(&document, RESULTS_TABLE_CLASS).map_err(|e| match e {
        Error::MalformedResponse { reason, .. } => Error::malformed(
            CONTEXT,
            format!("{reason} (unknown protein or changed page layout)"),
        ),
        other => other,
    })?;
    into_peptide_table(raw)
}

fn into_peptide_table(raw: RawTable) -> Result<PeptideTable> {
    let RawTable { header, rows } = raw;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, cells)| {
            if cells.len() != header.len() {
                return Err(Error::malformed(
                    CONTEXT,
                    format!(
                        "row {} has {} cells, header has {}",
                        i + 1,
                        cells.len(),
                        header.len()
                    ),
                ));
            }
            Ok(PeptideRecord::new(
                header.iter().cloned().zip(cells).collect(),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PeptideTable::new(header, records))
}

/// Digest `protein` with the default configuration.
pub async fn digest(
    protein: &str,
    min_mass: f64,
    max_mass: f64,
    enzyme: &str,
) -> Result<PeptideTable> {
    let client = PeptideMassClient::new(&ClientConfig::from_env()?)?;
    let request = DigestRequest::new(protein)
        .mass_range(min_mass, max_mass)
        .enzyme(enzyme);
    client.digest(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> &'a str {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_default_request_params() {
        let params = DigestRequest::new("P02768").query_params();
        assert_eq!(param(&params, "protein"), "P02768");
        assert_eq!(param(&params, "reagents"), "nothing+(in+reduced+form)");
        assert_eq!(param(&params, "mplus"), "mh");
        assert_eq!(param(&params, "masses"), "monoisotopic");
        assert_eq!(param(&params, "enzyme"), "Trypsin");
        assert_eq!(param(&params, "MC"), "0");
        assert_eq!(param(&params, "minmass"), "500");
        assert_eq!(param(&params, "maxmass"), "3500");
        assert_eq!(param(&params, "order"), "mass");
        assert_eq!(params.len(), 9);
    }

    #[test]
    fn test_custom_request_params() {
        let params = DigestRequest::new("ALBU_HUMAN")
            .mass_range(750.5, 4000.0)
            .enzyme("LysC")
            .query_params();
        assert_eq!(param(&params, "minmass"), "750.5");
        assert_eq!(param(&params, "maxmass"), "4000");
        assert_eq!(param(&params, "enzyme"), "LysC");
    }

    #[test]
    fn test_parse_page() {
        let html = r#"<table class="type-1">
            <tr><th>mass</th><th>position</th><th>peptide sequence</th></tr>
            <tr><td>927.4934</td><td>35-41</td><td>FKDLGEE</td></tr>
            <tr><td>1149.6153</td><td>66-75</td><td>LVNEVTEFAK</td></tr>
        </table>"#;
        let table = parse_digest_page(html).unwrap();
        assert_eq!(table.columns(), ["mass", "position", "peptide sequence"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].get("peptide sequence"), Some("LVNEVTEFAK"));
    }

    #[test]
    fn test_header_only_table_is_empty_not_error() {
        let html = r#"<table class="type-1"><tr><th>mass</th></tr></table>"#;
        let table = parse_digest_page(html).unwrap();
        assert_eq!(table.columns(), ["mass"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_cell_count_mismatch_is_malformed() {
        let html = r#"<table class="type-1">
            <tr><th>mass</th><th>position</th></tr>
            <tr><td>927.4934</td></tr>
        </table>"#;
        let err = parse_digest_page(html).unwrap_err();
        assert!(err.is_malformed_response());
        assert!(err.to_string().contains("row 1 has 1 cells, header has 2"));
    }

    #[test]
    fn test_unknown_protein_page_is_malformed() {
        let html = "<html><body><p>Sorry, no entry found.</p></body></html>";
        let err = parse_digest_page(html).unwrap_err();
        assert!(err.is_malformed_response());
        assert!(err.to_string().starts_with("Malformed response from PeptideMass"));
    }
}
