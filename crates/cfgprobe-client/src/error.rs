/// Client-specific result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from the config endpoint client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse a response body
    #[error("failed to parse response (status {status}): {message}")]
    Parse {
        /// HTTP status of the response
        status: u16,
        /// Parser error
        message: String,
    },

    /// Invalid client configuration or header value
    #[error("invalid configuration: {0}")]
    Config(String),
}
