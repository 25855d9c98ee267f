use serde::{Deserialize, Serialize};

/// Body of a successful `GET /v1alpha1/config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigReport {
    /// Whether the engine was started with an admin secret
    pub is_admin_secret_set: bool,
    /// Whether the engine was started with an auth webhook
    pub is_auth_hook_set: bool,
    /// Whether the engine was started with a JWT config
    pub is_jwt_set: bool,
    /// Claims settings, or an empty array when JWT is not configured
    pub jwt: JwtReport,
}

/// The `jwt` field of a [`ConfigReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JwtReport {
    /// Array form; empty when JWT is not configured
    // Listed first: the claims struct would also accept an empty array
    Entries(Vec<serde_json::Value>),
    /// Object describing the active claims settings
    Claims(JwtClaimsReport),
}

impl JwtReport {
    /// Whether the engine reported no JWT settings at all
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Entries(entries) if entries.is_empty())
    }

    /// Claims settings when reported as an object
    pub const fn claims(&self) -> Option<&JwtClaimsReport> {
        match self {
            Self::Claims(claims) => Some(claims),
            Self::Entries(_) => None,
        }
    }
}

/// Claims settings reported for a configured JWT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaimsReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims_namespace_path: Option<String>,
}

/// Error envelope returned by the engine on 4xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// JSON path the error refers to, usually `$`
    #[serde(default)]
    pub path: Option<String>,
    /// Human-readable message
    pub error: String,
    /// Machine-readable code, e.g. `access-denied`
    #[serde(default)]
    pub code: Option<String>,
}
