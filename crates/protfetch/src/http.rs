//! Single-shot async GET wrapping reqwest.
//!
//! One request per call: no retry, no backoff. Any non-2xx status becomes
//! [`Error::RemoteRequest`] carrying the status and the raw body.

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Response from a successful GET request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Final URL after redirects, query string included.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// HTTP client shared by the UniProt and PeptideMass lookups.
#[derive(Debug, Clone)]
pub struct HttpRequester {
    client: reqwest::Client,
}

impl HttpRequester {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` with `params` appended as a query string.
    ///
    /// Values are pre-stringified by the caller and URL-encoded here.
    pub async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        headers: &[(String, String)],
    ) -> Result<RawResponse> {
        let mut builder = self.client.get(url).query(params);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        tracing::debug!(url, params = params.len(), "sending GET");

        let resp = builder.send().await?;
        let status = resp.status();
        let final_url = resp.url().to_string();

        if !status.is_success() {
            // Keep the status even when the error body cannot be read.
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(url = %final_url, status = status.as_u16(), "remote request failed");
            tracing::debug!(body = %body, "failed response body");
            return Err(Error::RemoteRequest {
                url: final_url,
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");

        Ok(RawResponse {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}
