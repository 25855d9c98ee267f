use serde::Deserialize;

/// Check behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecksConfig {
    /// How strictly default JWT claims settings are asserted
    #[serde(default)]
    pub jwt_defaults: JwtDefaults,
    /// Role sent when probing as a non-admin
    #[serde(default = "default_user_role")]
    pub user_role: String,
    /// Role sent when probing as an admin
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            jwt_defaults: JwtDefaults::default(),
            user_role: default_user_role(),
            admin_role: default_admin_role(),
        }
    }
}

/// Assertion policy for JWT configs that rely on the default claims namespace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JwtDefaults {
    /// Always assert namespace and format, falling back to the engine defaults
    #[default]
    Strict,
    /// Only assert namespace and format when `claims_format` is configured
    Lenient,
}

fn default_user_role() -> String {
    "user".to_string()
}

fn default_admin_role() -> String {
    "admin".to_string()
}
