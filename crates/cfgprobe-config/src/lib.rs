#![allow(clippy::must_use_candidate)]

//! Fixture configuration for the config-endpoint probe
//!
//! Describes how the engine under test was started (admin secret, auth
//! webhook, JWT settings) so the probe can derive what the engine should
//! report about itself.

pub mod auth;
pub mod checks;
pub mod client;
mod env;
pub mod jwt;
mod loader;
pub mod target;
pub mod telemetry;

use serde::Deserialize;

pub use auth::*;
pub use checks::*;
pub use client::*;
pub use jwt::*;
pub use target::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level probe configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Engine under test
    #[serde(default)]
    pub target: TargetConfig,
    /// Credentials the engine was started with
    #[serde(default)]
    pub auth: AuthConfig,
    /// HTTP client settings
    #[serde(default)]
    pub client: ClientConfig,
    /// Check behaviour
    #[serde(default)]
    pub checks: ChecksConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
