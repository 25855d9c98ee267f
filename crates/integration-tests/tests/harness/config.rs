//! Builds matching engine setups and probe fixtures

use cfgprobe_config::{Config, JwtDefaults, JwtSource};
use secrecy::SecretString;
use serde_json::Value;
use url::Url;

use super::mock_engine::EngineSetup;

/// Builder producing an engine setup and the fixture that describes it
pub struct FixtureBuilder {
    setup: EngineSetup,
    probe_secret: Option<Option<String>>,
    jwt_defaults: JwtDefaults,
}

impl FixtureBuilder {
    /// No admin secret, webhook or JWT
    pub fn new() -> Self {
        Self {
            setup: EngineSetup::default(),
            probe_secret: None,
            jwt_defaults: JwtDefaults::Strict,
        }
    }

    pub fn with_admin_secret(mut self, secret: &str) -> Self {
        self.setup.admin_secret = Some(secret.to_owned());
        self
    }

    pub fn with_webhook(mut self, url: &str) -> Self {
        self.setup.webhook = Some(url.to_owned());
        self
    }

    pub fn with_jwt(mut self, conf: Value) -> Self {
        self.setup.jwt = Some(conf);
        self
    }

    /// Engine answers a missing admin secret with 400
    pub fn with_missing_secret_as_bad_request(mut self) -> Self {
        self.setup.missing_secret_is_bad_request = true;
        self
    }

    /// Make the probe use a different admin secret than the engine
    pub fn with_probe_secret(mut self, secret: Option<&str>) -> Self {
        self.probe_secret = Some(secret.map(str::to_owned));
        self
    }

    pub fn with_jwt_defaults(mut self, defaults: JwtDefaults) -> Self {
        self.jwt_defaults = defaults;
        self
    }

    /// Engine setup to start the mock with
    pub fn setup(&self) -> EngineSetup {
        self.setup.clone()
    }

    /// Probe fixture pointing at `base_url`
    pub fn config(&self, base_url: &str) -> Config {
        let mut config = Config::default();
        config.target.url = Url::parse(base_url).expect("valid URL");

        let secret = self
            .probe_secret
            .clone()
            .unwrap_or_else(|| self.setup.admin_secret.clone());
        config.auth.admin_secret = secret.map(SecretString::from);
        config.auth.webhook = self.setup.webhook.clone();
        config.auth.jwt = self.setup.jwt.as_ref().map(|conf| JwtSource::Encoded(conf.to_string()));
        config.checks.jwt_defaults = self.jwt_defaults;

        config
    }
}
