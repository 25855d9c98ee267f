use std::fmt;

use serde::Serialize;

use crate::error::CheckFailure;

/// The contract checks, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// A non-admin role is refused with 400
    UserRoleRejected,
    /// The admin view reports the fixture accurately
    AdminReport,
    /// With an admin secret set, a header-less request is refused
    UnauthenticatedRejected,
}

impl Check {
    pub const ALL: [Self; 3] = [Self::UserRoleRejected, Self::AdminReport, Self::UnauthenticatedRejected];

    /// Stable identifier used in logs and JSON output
    pub const fn name(self) -> &'static str {
        match self {
            Self::UserRoleRejected => "user_role_rejected",
            Self::AdminReport => "admin_report",
            Self::UnauthenticatedRejected => "unauthenticated_rejected",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one check
#[derive(Debug)]
pub enum CheckStatus {
    Passed,
    Skipped { reason: &'static str },
    Failed(CheckFailure),
}

/// A check paired with its result
#[derive(Debug)]
pub struct CheckOutcome {
    pub check: Check,
    pub status: CheckStatus,
}

impl CheckOutcome {
    pub const fn is_failed(&self) -> bool {
        matches!(self.status, CheckStatus::Failed(_))
    }
}

/// Outcomes of a full probe run
#[derive(Debug)]
pub struct ProbeReport {
    /// Endpoint that was probed
    pub endpoint: String,
    pub outcomes: Vec<CheckOutcome>,
}

impl ProbeReport {
    /// True when no check failed; skipped checks do not count against it
    pub fn is_success(&self) -> bool {
        !self.outcomes.iter().any(CheckOutcome::is_failed)
    }

    /// Outcome of a specific check
    pub fn outcome(&self, check: Check) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|outcome| outcome.check == check)
    }

    fn count(&self, pred: impl Fn(&CheckStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|outcome| pred(&outcome.status)).count()
    }

    pub fn passed(&self) -> usize {
        self.count(|status| matches!(status, CheckStatus::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|status| matches!(status, CheckStatus::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|status| matches!(status, CheckStatus::Skipped { .. }))
    }

    /// Machine-readable form of the report
    pub fn to_json(&self) -> serde_json::Value {
        let outcomes = self
            .outcomes
            .iter()
            .map(|outcome| {
                let (status, detail) = match &outcome.status {
                    CheckStatus::Passed => ("passed", None),
                    CheckStatus::Skipped { reason } => ("skipped", Some((*reason).to_owned())),
                    CheckStatus::Failed(failure) => ("failed", Some(failure.to_string())),
                };

                serde_json::json!({
                    "check": outcome.check,
                    "status": status,
                    "detail": detail,
                })
            })
            .collect::<Vec<_>>();

        serde_json::json!({
            "endpoint": self.endpoint,
            "success": self.is_success(),
            "passed": self.passed(),
            "failed": self.failed(),
            "skipped": self.skipped(),
            "outcomes": outcomes,
        })
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "probed {}", self.endpoint)?;

        for outcome in &self.outcomes {
            match &outcome.status {
                CheckStatus::Passed => writeln!(f, "  PASS  {}", outcome.check)?,
                CheckStatus::Skipped { reason } => writeln!(f, "  SKIP  {} ({reason})", outcome.check)?,
                CheckStatus::Failed(failure) => writeln!(f, "  FAIL  {}: {failure}", outcome.check)?,
            }
        }

        write!(
            f,
            "{} checks: {} passed, {} failed, {} skipped",
            self.outcomes.len(),
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }
}
