//! Client configuration and resolution.
//!
//! Values resolve as: explicit setter > environment variable > default.

use std::time::Duration;

use crate::error::{Error, Result};

/// UniProtKB REST search endpoint.
pub const DEFAULT_UNIPROT_SEARCH_URL: &str = "https://rest.uniprot.org/uniprotkb/search";

/// Expasy PeptideMass CGI endpoint.
pub const DEFAULT_PEPTIDE_MASS_URL: &str =
    "https://web.expasy.org/cgi-bin/peptide_mass/peptide-mass.pl";

/// Transport timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_UNIPROT_URL: &str = "PROTFETCH_UNIPROT_URL";
pub const ENV_PEPTIDE_MASS_URL: &str = "PROTFETCH_PEPTIDE_MASS_URL";
pub const ENV_TIMEOUT_MS: &str = "PROTFETCH_TIMEOUT_MS";

/// Which field of a UniProt search result is returned as the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierField {
    /// Entry name, e.g. `BRCA1_HUMAN`.
    #[default]
    EntryName,
    /// Primary accession, e.g. `P38398`.
    Accession,
}

impl IdentifierField {
    /// Key of this field in the UniProt JSON result objects.
    pub fn json_key(self) -> &'static str {
        match self {
            IdentifierField::EntryName => "uniProtkbId",
            IdentifierField::Accession => "primaryAccession",
        }
    }
}

/// Settings shared by both remote clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub uniprot_search_url: String,
    pub peptide_mass_url: String,
    /// Upper bound on a whole request, connect through body read.
    pub timeout: Duration,
    pub user_agent: String,
    pub identifier_field: IdentifierField,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            uniprot_search_url: DEFAULT_UNIPROT_SEARCH_URL.to_string(),
            peptide_mass_url: DEFAULT_PEPTIDE_MASS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("protfetch/{}", env!("CARGO_PKG_VERSION")),
            identifier_field: IdentifierField::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `PROTFETCH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_UNIPROT_URL) {
            config.uniprot_search_url = url;
        }
        if let Some(url) = lookup(ENV_PEPTIDE_MASS_URL) {
            config.peptide_mass_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let ms = raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("{ENV_TIMEOUT_MS} must be milliseconds, got {raw:?}"))
            })?;
            config.timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    pub fn with_uniprot_search_url(mut self, url: impl Into<String>) -> Self {
        self.uniprot_search_url = url.into();
        self
    }

    pub fn with_peptide_mass_url(mut self, url: impl Into<String>) -> Self {
        self.peptide_mass_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_identifier_field(mut self, field: IdentifierField) -> Self {
        self.identifier_field = field;
        self
    }
}
