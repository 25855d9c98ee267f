use cfgprobe_client::{ConfigClient, ConfigReport, ConfigResponse};
use cfgprobe_config::Config;

use crate::error::CheckFailure;
use crate::expectation::{ExpectedJwt, Expectation};
use crate::report::{Check, CheckOutcome, CheckStatus, ProbeReport};

/// Statuses accepted for a request without any auth headers
const UNAUTHENTICATED_STATUSES: [u16; 2] = [401, 400];

/// Run every check against the engine and collect the outcomes
///
/// # Errors
///
/// Returns an error if the expectation cannot be derived from `config`;
/// individual check failures are recorded in the report instead
pub async fn run_all(client: &ConfigClient, config: &Config) -> anyhow::Result<ProbeReport> {
    let expectation = Expectation::from_config(config)?;
    let mut outcomes = Vec::with_capacity(Check::ALL.len());

    for check in Check::ALL {
        let status = match check {
            Check::UserRoleRejected => into_status(user_role_rejected(client, config).await),
            Check::AdminReport => into_status(admin_report(client, config, &expectation).await.map(drop)),
            Check::UnauthenticatedRejected if config.auth.admin_secret.is_none() => CheckStatus::Skipped {
                reason: "no admin secret configured",
            },
            Check::UnauthenticatedRejected => into_status(unauthenticated_rejected(client).await),
        };

        match &status {
            CheckStatus::Passed => tracing::info!(%check, "check passed"),
            CheckStatus::Skipped { reason } => tracing::info!(%check, reason, "check skipped"),
            CheckStatus::Failed(failure) => tracing::warn!(%check, error = %failure, "check failed"),
        }

        outcomes.push(CheckOutcome { check, status });
    }

    Ok(ProbeReport {
        endpoint: client.endpoint().to_string(),
        outcomes,
    })
}

fn into_status(result: Result<(), CheckFailure>) -> CheckStatus {
    result.map_or_else(CheckStatus::Failed, |()| CheckStatus::Passed)
}

/// The config endpoint is admin only: a non-admin role gets 400 even when
/// the correct admin secret accompanies it
pub async fn user_role_rejected(client: &ConfigClient, config: &Config) -> Result<(), CheckFailure> {
    let response = client
        .fetch_config(Some(config.checks.user_role.as_str()), config.auth.admin_secret.as_ref())
        .await?;

    expect_status(&response, &[400])
}

/// The admin view answers 200 and reports the fixture accurately
pub async fn admin_report(
    client: &ConfigClient,
    config: &Config,
    expectation: &Expectation,
) -> Result<ConfigReport, CheckFailure> {
    let response = client
        .fetch_config(Some(config.checks.admin_role.as_str()), config.auth.admin_secret.as_ref())
        .await?;

    expect_status(&response, &[200])?;

    let report = response.report().map_err(|e| CheckFailure::MalformedBody {
        message: e.to_string(),
        body: response.body_snippet().to_owned(),
    })?;

    verify_report(&report, expectation)?;

    Ok(report)
}

/// A request carrying no auth headers is refused when an admin secret is set
pub async fn unauthenticated_rejected(client: &ConfigClient) -> Result<(), CheckFailure> {
    let response = client.fetch_config(None, None).await?;

    expect_status(&response, &UNAUTHENTICATED_STATUSES)
}

/// Compare a parsed report against the expectation, stopping at the first mismatch
pub fn verify_report(report: &ConfigReport, expectation: &Expectation) -> Result<(), CheckFailure> {
    expect_field("is_admin_secret_set", &expectation.admin_secret_set, &report.is_admin_secret_set)?;
    expect_field("is_auth_hook_set", &expectation.auth_hook_set, &report.is_auth_hook_set)?;
    expect_field("is_jwt_set", &expectation.jwt_set, &report.is_jwt_set)?;

    match &expectation.jwt {
        ExpectedJwt::Unset if report.jwt.is_unset() => Ok(()),
        ExpectedJwt::Unset => Err(CheckFailure::mismatch("jwt", &serde_json::json!([]), &report.jwt)),
        ExpectedJwt::NamespacePath { path, format } => {
            let claims = report
                .jwt
                .claims()
                .ok_or_else(|| CheckFailure::mismatch("jwt", "claims object", &report.jwt))?;

            expect_field("jwt.claims_namespace_path", &Some(path), &claims.claims_namespace_path.as_ref())?;
            expect_field("jwt.claims_format", &Some(format), &claims.claims_format.as_ref())
        }
        ExpectedJwt::Namespace { namespace, format } => {
            let claims = report
                .jwt
                .claims()
                .ok_or_else(|| CheckFailure::mismatch("jwt", "claims object", &report.jwt))?;

            expect_field("jwt.claims_namespace", &Some(namespace), &claims.claims_namespace.as_ref())?;
            expect_field("jwt.claims_format", &Some(format), &claims.claims_format.as_ref())
        }
        ExpectedJwt::Unchecked => Ok(()),
    }
}

fn expect_status(response: &ConfigResponse, accepted: &[u16]) -> Result<(), CheckFailure> {
    if accepted.contains(&response.status) {
        return Ok(());
    }

    if let Some(error) = response.error_body() {
        tracing::debug!(status = response.status, code = ?error.code, message = %error.error, "engine error body");
    }

    Err(CheckFailure::UnexpectedStatus {
        expected: accepted.to_vec(),
        actual: response.status,
        body: response.body_snippet().to_owned(),
    })
}

fn expect_field<T>(field: &'static str, expected: &T, actual: &T) -> Result<(), CheckFailure>
where
    T: PartialEq + serde::Serialize,
{
    if expected == actual {
        Ok(())
    } else {
        Err(CheckFailure::mismatch(field, expected, actual))
    }
}
