#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::path::Path;
use std::process::ExitCode;

use args::{Args, DEFAULT_CONFIG, Output};
use cfgprobe_client::ConfigClient;
use cfgprobe_config::Config;
use clap::Parser;

/// Some check failed
const EXIT_FAILED: u8 = 1;
/// The probe could not run
const EXIT_SETUP: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILED),
        Err(e) => {
            eprintln!("cfgprobe: {e:#}");
            ExitCode::from(EXIT_SETUP)
        }
    }
}

/// Run the probe, returning whether every check passed or was skipped
async fn run(args: Args) -> anyhow::Result<bool> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(url) = args.url {
        config.target.url = url;
        config.validate()?;
    }

    cfgprobe_telemetry::init(&config.telemetry, args.log_filter.as_deref())?;

    tracing::info!(
        target_url = %config.target.url,
        admin_secret = config.auth.admin_secret.is_some(),
        webhook = config.auth.webhook.is_some(),
        jwt = config.auth.jwt.is_some(),
        "starting config probe"
    );

    let overrides = Config::active_env_overrides();
    if !overrides.is_empty() {
        tracing::debug!(?overrides, "fixture overridden from environment");
    }

    let client = ConfigClient::new(&config.target.url, config.client.timeout())?;
    let report = cfgprobe_checks::run_all(&client, &config).await?;

    match args.output {
        Output::Text => println!("{report}"),
        Output::Json => println!("{}", serde_json::to_string_pretty(&report.to_json())?),
    }

    tracing::info!(
        passed = report.passed(),
        failed = report.failed(),
        skipped = report.skipped(),
        "config probe finished"
    );

    Ok(report.is_success())
}

/// Load the explicit config file, the default file when present, or the environment alone
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    let default = Path::new(DEFAULT_CONFIG);
    if default.exists() {
        Config::load(default)
    } else {
        Config::from_env()
    }
}
