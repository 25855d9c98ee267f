use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::{ClientError, Result};
use crate::headers::probe_headers;
use crate::types::{ConfigReport, ErrorBody};

/// Path of the configuration-reporting endpoint, relative to the base URL
pub const CONFIG_PATH: &str = "/v1alpha1/config";

/// Client for the engine's configuration endpoint
#[derive(Debug, Clone)]
pub struct ConfigClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ConfigClient {
    /// Create a client for the engine at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot carry a path or the HTTP client
    /// cannot be built
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Self::with_http(base_url, http)
    }

    /// Create a client reusing an existing HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot carry a path
    pub fn with_http(base_url: &Url, http: reqwest::Client) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!("invalid base URL: {base_url}")));
        }

        Ok(Self {
            http,
            endpoint: make_url(base_url, CONFIG_PATH),
        })
    }

    /// Full URL of the config endpoint
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `GET /v1alpha1/config` as `role`, optionally with the admin secret
    ///
    /// Passing `None` for both sends the request without any auth headers.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an invalid header value;
    /// any HTTP status is returned as a [`ConfigResponse`]
    pub async fn fetch_config(&self, role: Option<&str>, admin_secret: Option<&SecretString>) -> Result<ConfigResponse> {
        let headers = probe_headers(role, admin_secret)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            role = role.unwrap_or("<none>"),
            admin_secret = admin_secret.is_some(),
            "requesting engine config"
        );

        let response = self.http.get(self.endpoint.as_str()).headers(headers).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, bytes = body.len(), "engine config response received");

        Ok(ConfigResponse { status, body })
    }
}

/// Status and raw body of a config endpoint response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl ConfigResponse {
    /// Parse the body as a [`ConfigReport`]
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a well-formed report
    pub fn report(&self) -> Result<ConfigReport> {
        serde_json::from_str(&self.body).map_err(|e| ClientError::Parse {
            status: self.status,
            message: e.to_string(),
        })
    }

    /// Parse the body as arbitrary JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.body).map_err(|e| ClientError::Parse {
            status: self.status,
            message: e.to_string(),
        })
    }

    /// The engine's error envelope, if the body is one
    pub fn error_body(&self) -> Option<ErrorBody> {
        serde_json::from_str(&self.body).ok()
    }

    /// Body truncated for diagnostics
    pub fn body_snippet(&self) -> &str {
        const MAX: usize = 512;

        if self.body.len() <= MAX {
            return &self.body;
        }

        let mut end = MAX;
        while !self.body.is_char_boundary(end) {
            end -= 1;
        }
        &self.body[..end]
    }
}

/// Append `path` to the base URL's own path
fn make_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    let joined = format!("{}{path}", base_url.path().trim_end_matches('/'));
    url.set_path(&joined);
    url.set_query(None);
    url
}
