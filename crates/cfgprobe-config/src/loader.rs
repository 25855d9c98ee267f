use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::env::{ADMIN_SECRET_VAR, JWT_CONF_VAR, URL_VAR, WEBHOOK_VAR, expand_env, override_var};
use crate::{Config, JwtSource};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, applies the
    /// `HGE_*` environment overrides, then validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml_str(&raw)
    }

    /// Build configuration from defaults and `HGE_*` environment variables only
    ///
    /// # Errors
    ///
    /// Returns an error if an override is malformed or validation fails
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, overrides or validation fail
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let expanded = expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let mut config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Names of the `HGE_*` variables currently overriding the file
    pub fn active_env_overrides() -> Vec<&'static str> {
        [URL_VAR, ADMIN_SECRET_VAR, WEBHOOK_VAR, JWT_CONF_VAR]
            .into_iter()
            .filter(|name| override_var(name).is_some())
            .collect()
    }

    /// Apply `HGE_URL`, `HGE_KEY`, `HGE_WEBHOOK` and `HGE_JWT_CONF`
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Some(url) = override_var(URL_VAR) {
            self.target.url = Url::parse(&url).map_err(|e| anyhow::anyhow!("invalid {URL_VAR} `{url}`: {e}"))?;
        }

        if let Some(secret) = override_var(ADMIN_SECRET_VAR) {
            self.auth.admin_secret = Some(SecretString::from(secret));
        }

        if let Some(webhook) = override_var(WEBHOOK_VAR) {
            self.auth.webhook = Some(webhook);
        }

        if let Some(jwt) = override_var(JWT_CONF_VAR) {
            self.auth.jwt = Some(JwtSource::Encoded(jwt));
        }

        Ok(())
    }

    /// Validate that the configuration is internally consistent
    ///
    /// A JWT config naming both `claims_namespace` and
    /// `claims_namespace_path` is rejected: the engine refuses to start
    /// with that combination, so no expectation can be derived for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the target URL cannot carry a path, a credential
    /// is empty, the JWT config does not parse, or the timeout is zero
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_target()?;
        self.validate_auth()?;
        self.validate_checks()?;

        if self.client.timeout_secs == 0 {
            anyhow::bail!("client.timeout_secs must be greater than 0");
        }

        Ok(())
    }

    fn validate_target(&self) -> anyhow::Result<()> {
        let url = &self.target.url;

        if url.cannot_be_a_base() {
            anyhow::bail!("target.url `{url}` cannot be used as a base URL");
        }

        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("target.url must use http or https, got `{}`", url.scheme());
        }

        Ok(())
    }

    fn validate_auth(&self) -> anyhow::Result<()> {
        if let Some(ref secret) = self.auth.admin_secret
            && secret.expose_secret().is_empty()
        {
            anyhow::bail!("auth.admin_secret must not be empty when set");
        }

        if let Some(ref webhook) = self.auth.webhook
            && webhook.trim().is_empty()
        {
            anyhow::bail!("auth.webhook must not be empty when set");
        }

        let jwt = self.auth.jwt_conf()?;

        if let Some(jwt) = jwt
            && jwt.claims_namespace_path.is_some()
            && jwt.claims_namespace.is_some()
        {
            anyhow::bail!("auth.jwt cannot set both claims_namespace and claims_namespace_path");
        }

        Ok(())
    }

    fn validate_checks(&self) -> anyhow::Result<()> {
        if self.checks.user_role.trim().is_empty() || self.checks.admin_role.trim().is_empty() {
            anyhow::bail!("checks.user_role and checks.admin_role must not be empty");
        }

        if self.checks.user_role == self.checks.admin_role {
            anyhow::bail!("checks.user_role must differ from checks.admin_role");
        }

        Ok(())
    }
}
