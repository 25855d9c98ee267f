use serde::Deserialize;
use url::Url;

/// Engine under test
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Base URL of the engine, e.g. `http://localhost:8080`
    #[serde(default = "default_url")]
    pub url: Url,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

fn default_url() -> Url {
    Url::parse("http://localhost:8080").expect("must be valid URL")
}
