use secrecy::SecretString;
use serde::Deserialize;

use crate::jwt::JwtConf;

/// Credentials the engine under test was started with
///
/// Only presence matters for the webhook; the JWT config is inspected to
/// derive the expected claims reporting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Admin secret, sent as `x-hasura-admin-secret`
    #[serde(default)]
    pub admin_secret: Option<SecretString>,
    /// Authentication webhook URL
    #[serde(default)]
    pub webhook: Option<String>,
    /// JWT configuration, either a JSON string or an inline table
    #[serde(default)]
    pub jwt: Option<JwtSource>,
}

impl AuthConfig {
    /// Parse the configured JWT settings, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the JWT config is not a valid JSON object
    pub fn jwt_conf(&self) -> anyhow::Result<Option<JwtConf>> {
        self.jwt.as_ref().map(JwtSource::parse).transpose()
    }
}

/// Where the JWT configuration comes from
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JwtSource {
    /// JSON-encoded string, as passed to the engine on its command line
    Encoded(String),
    /// Inline TOML table
    Inline(serde_json::Map<String, serde_json::Value>),
}

impl JwtSource {
    /// Parse into a [`JwtConf`]
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not a JSON object with the
    /// expected field types
    pub fn parse(&self) -> anyhow::Result<JwtConf> {
        match self {
            Self::Encoded(raw) => JwtConf::from_json_str(raw),
            Self::Inline(map) => serde_json::from_value(serde_json::Value::Object(map.clone()))
                .map_err(|e| anyhow::anyhow!("invalid inline JWT config: {e}")),
        }
    }
}
