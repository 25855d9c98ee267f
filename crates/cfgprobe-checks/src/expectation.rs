use cfgprobe_config::{Config, DEFAULT_CLAIMS_FORMAT, JwtConf, JwtDefaults};

/// What the engine should report about its own configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub admin_secret_set: bool,
    pub auth_hook_set: bool,
    pub jwt_set: bool,
    pub jwt: ExpectedJwt,
}

/// Expected shape of the `jwt` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedJwt {
    /// JWT not configured: the field is an empty array
    Unset,
    /// Claims located by JSON path
    NamespacePath { path: String, format: String },
    /// Claims located by namespace key
    Namespace { namespace: String, format: String },
    /// Configured, but the lenient policy leaves the claims settings unasserted
    Unchecked,
}

impl Expectation {
    /// Derive the expectation from the fixture
    ///
    /// # Errors
    ///
    /// Returns an error if the JWT config cannot be parsed
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let jwt_conf = config.auth.jwt_conf()?;

        Ok(Self {
            admin_secret_set: config.auth.admin_secret.is_some(),
            auth_hook_set: config.auth.webhook.is_some(),
            jwt_set: jwt_conf.is_some(),
            jwt: jwt_conf.map_or(ExpectedJwt::Unset, |conf| {
                ExpectedJwt::from_conf(&conf, config.checks.jwt_defaults)
            }),
        })
    }
}

impl ExpectedJwt {
    /// Claims reporting the engine should show for `conf`
    ///
    /// A namespace path always reports as such, with a `json` claims format
    /// whatever `claims_format` says. Otherwise the namespace
    /// falls back to the engine default; under [`JwtDefaults::Lenient`] the
    /// fallback is only asserted when `claims_format` is set explicitly.
    pub fn from_conf(conf: &JwtConf, defaults: JwtDefaults) -> Self {
        if let Some(ref path) = conf.claims_namespace_path {
            return Self::NamespacePath {
                path: path.clone(),
                format: DEFAULT_CLAIMS_FORMAT.to_owned(),
            };
        }

        if defaults == JwtDefaults::Lenient && conf.claims_format.is_none() {
            return Self::Unchecked;
        }

        Self::Namespace {
            namespace: conf.effective_claims_namespace().to_owned(),
            format: conf.effective_claims_format().to_owned(),
        }
    }
}
