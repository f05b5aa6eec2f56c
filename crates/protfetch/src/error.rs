//! Error types for remote lookups and response parsing.

/// All errors that can occur while talking to the remote services.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The remote service answered with a non-success status.
    #[error("Remote request to {url} failed with status {status}")]
    RemoteRequest {
        url: String,
        status: u16,
        body: String,
    },

    /// The response had a success status but not the expected shape.
    #[error("Malformed response from {context}: {reason}")]
    MalformedResponse {
        context: &'static str,
        reason: String,
    },

    /// The request never produced a status (connect, TLS, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn malformed(context: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedResponse {
            context,
            reason: reason.into(),
        }
    }

    /// True when the remote service rejected the request ("service down").
    pub fn is_remote_request(&self) -> bool {
        matches!(self, Error::RemoteRequest { .. })
    }

    /// True when the service answered but its output changed shape.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Error::MalformedResponse { .. })
    }

    /// HTTP status code carried by a [`Error::RemoteRequest`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteRequest { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body carried by a [`Error::RemoteRequest`].
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::RemoteRequest { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_request_accessors() {
        let err = Error::RemoteRequest {
            url: "https://example.org/search".to_string(),
            status: 503,
            body: "maintenance".to_string(),
        };
        assert!(err.is_remote_request());
        assert!(!err.is_malformed_response());
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.body(), Some("maintenance"));
        assert_eq!(
            err.to_string(),
            "Remote request to https://example.org/search failed with status 503"
        );
    }

    #[test]
    fn test_malformed_has_no_status() {
        let err = Error::malformed("PeptideMass", "no results table");
        assert!(err.is_malformed_response());
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "Malformed response from PeptideMass: no results table"
        );
    }
}
