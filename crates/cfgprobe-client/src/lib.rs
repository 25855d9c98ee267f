#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed HTTP client for the engine's `/v1alpha1/config` endpoint
//!
//! Non-success statuses are returned as data rather than errors, since
//! callers assert on them.

mod client;
pub mod error;
pub mod headers;
pub mod types;

pub use client::{CONFIG_PATH, ConfigClient, ConfigResponse};
pub use error::{ClientError, Result};
pub use headers::{ADMIN_SECRET_HEADER, ROLE_HEADER, probe_headers};
pub use types::*;
