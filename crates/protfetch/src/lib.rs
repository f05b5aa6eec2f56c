//! protfetch — thin client for UniProt identifier search and Expasy
//! PeptideMass in-silico digestion.
//!
//! All computation happens remotely; this crate builds requests and
//! turns the JSON or HTML answers into Rust values.

pub mod config;
pub mod error;
pub mod http;
pub mod peptide_mass;
pub mod table;
pub mod types;
pub mod uniprot;

pub use config::{ClientConfig, IdentifierField};
pub use error::{Error, Result};
pub use http::{HttpRequester, RawResponse};
pub use peptide_mass::{digest, parse_digest_page, DigestRequest, PeptideMassClient};
pub use table::{extract_table, RawTable};
pub use types::{PeptideRecord, PeptideTable};
pub use uniprot::{lookup, parse_search_results, IdentifierQuery, UniProtClient};
