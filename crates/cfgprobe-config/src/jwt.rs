use serde::Deserialize;

/// Namespace the engine reads claims from when none is configured
pub const DEFAULT_CLAIMS_NAMESPACE: &str = "https://hasura.io/jwt/claims";

/// Claims format the engine assumes when none is configured
pub const DEFAULT_CLAIMS_FORMAT: &str = "json";

/// The parts of an engine JWT config that affect claims reporting
///
/// Keys such as `type`, `key` or `jwk_url` are kept in `other` and never
/// inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JwtConf {
    /// JSON path to the claims object inside the token payload
    #[serde(default)]
    pub claims_namespace_path: Option<String>,
    /// Key of the claims object inside the token payload
    #[serde(default)]
    pub claims_namespace: Option<String>,
    /// `json` or `stringified_json`
    #[serde(default)]
    pub claims_format: Option<String>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl JwtConf {
    /// Parse a JSON-encoded JWT config
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a JSON object with the
    /// expected field types
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("invalid JWT config: {e}"))
    }

    /// Claims format the engine should report
    pub fn effective_claims_format(&self) -> &str {
        self.claims_format.as_deref().unwrap_or(DEFAULT_CLAIMS_FORMAT)
    }

    /// Claims namespace the engine should report when no path is configured
    pub fn effective_claims_namespace(&self) -> &str {
        self.claims_namespace.as_deref().unwrap_or(DEFAULT_CLAIMS_NAMESPACE)
    }
}
