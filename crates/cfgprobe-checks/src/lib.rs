#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Contract checks for the engine's configuration endpoint
//!
//! Each check issues one or two requests and fails fast on the first
//! mismatch. Checks are independent of one another.

mod checks;
pub mod error;
pub mod expectation;
pub mod report;

pub use checks::{admin_report, run_all, unauthenticated_rejected, user_role_rejected, verify_report};
pub use error::CheckFailure;
pub use expectation::{ExpectedJwt, Expectation};
pub use report::{Check, CheckOutcome, CheckStatus, ProbeReport};
