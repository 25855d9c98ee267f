use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

/// Default config file, used only when present
pub const DEFAULT_CONFIG: &str = "cfgprobe.toml";

/// Engine config endpoint probe
#[derive(Debug, Parser)]
#[command(
    name = "cfgprobe",
    about = "Check that an engine's /v1alpha1/config endpoint reports its auth setup correctly"
)]
pub struct Args {
    /// Path to configuration file; `cfgprobe.toml` is used when present
    #[arg(short, long, env = "CFGPROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the engine base URL
    #[arg(long)]
    pub url: Option<Url>,

    /// Override the log filter, e.g. `debug`
    #[arg(long, env = "CFGPROBE_LOG")]
    pub log_filter: Option<String>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = Output::Text)]
    pub output: Output,
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Output {
    Text,
    Json,
}
