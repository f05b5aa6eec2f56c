//! Gene-name lookup against the UniProtKB REST search API.

use serde::Deserialize;
use serde_json::Value;

use crate::config::{ClientConfig, IdentifierField};
use crate::error::{Error, Result};
use crate::http::HttpRequester;

/// NCBI taxonomy id for Homo sapiens.
pub const HUMAN_TAXONOMY_ID: u32 = 9606;

/// Page size requested from UniProt. Only the first page is read.
pub const SEARCH_PAGE_SIZE: u32 = 100;

const CONTEXT: &str = "UniProt search";

/// A gene-name search restricted to one organism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierQuery {
    pub gene_name: String,
    pub taxonomy_id: u32,
    /// Restrict to Swiss-Prot (manually reviewed) entries.
    pub reviewed_only: bool,
}

impl IdentifierQuery {
    pub fn new(gene_name: impl Into<String>) -> Self {
        Self {
            gene_name: gene_name.into(),
            taxonomy_id: HUMAN_TAXONOMY_ID,
            reviewed_only: true,
        }
    }

    pub fn taxonomy_id(mut self, taxonomy_id: u32) -> Self {
        self.taxonomy_id = taxonomy_id;
        self
    }

    pub fn reviewed_only(mut self, reviewed_only: bool) -> Self {
        self.reviewed_only = reviewed_only;
        self
    }

    /// UniProt query syntax, e.g. `(gene:BRCA1) AND (taxonomy_id:9606) AND (reviewed:true)`.
    pub fn query_string(&self) -> String {
        let mut query = format!(
            "(gene:{}) AND (taxonomy_id:{})",
            self.gene_name, self.taxonomy_id
        );
        if self.reviewed_only {
            query.push_str(" AND (reviewed:true)");
        }
        query
    }

    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query_string()),
            ("fields", "id".to_string()),
            ("size", SEARCH_PAGE_SIZE.to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Value>,
}

/// Client for the UniProtKB search endpoint.
#[derive(Debug, Clone)]
pub struct UniProtClient {
    http: HttpRequester,
    url: String,
    field: IdentifierField,
}

impl UniProtClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_requester(HttpRequester::new(config)?, config))
    }

    pub fn with_requester(http: HttpRequester, config: &ClientConfig) -> Self {
        Self {
            http,
            url: config.uniprot_search_url.clone(),
            field: config.identifier_field,
        }
    }

    /// Identifiers of the entries matching `query`, in UniProt's order.
    ///
    /// At most [`SEARCH_PAGE_SIZE`] entries are returned; later pages are
    /// never fetched.
    pub async fn lookup(&self, query: &IdentifierQuery) -> Result<Vec<String>> {
        let params = query.query_params();
        let headers = [("Accept".to_string(), "application/json".to_string())];
        let resp = self.http.get(&self.url, &params, &headers).await?;

        let ids = parse_search_results(&resp.body, self.field)?;
        tracing::debug!(gene = %query.gene_name, hits = ids.len(), "parsed UniProt results");
        Ok(ids)
    }
}

/// Pull `field` out of every entry of a UniProt search JSON body.
pub fn parse_search_results(body: &str, field: IdentifierField) -> Result<Vec<String>> {
    let parsed: SearchResponse = serde_json::from_str(body)
        .map_err(|e| Error::malformed(CONTEXT, format!("unexpected JSON: {e}")))?;

    let key = field.json_key();
    parsed
        .results
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::malformed(CONTEXT, format!("result {i} has no string field \"{key}\""))
                })
        })
        .collect()
}

/// Look up identifiers for `gene_name` with the default configuration.
pub async fn lookup(gene_name: &str, taxonomy_id: u32, reviewed_only: bool) -> Result<Vec<String>> {
    let client = UniProtClient::new(&ClientConfig::from_env()?)?;
    let query = IdentifierQuery::new(gene_name)
        .taxonomy_id(taxonomy_id)
        .reviewed_only(reviewed_only);
    client.lookup(&query).await
}
