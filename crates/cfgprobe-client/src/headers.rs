use http::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{ClientError, Result};

/// Role the request is made as
pub const ROLE_HEADER: &str = "x-hasura-role";

/// Admin secret credential
pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Build the auth headers for a config probe
///
/// `None` for both arguments yields an empty map, i.e. an unauthenticated
/// request.
pub fn probe_headers(role: Option<&str>, admin_secret: Option<&SecretString>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(role) = role {
        let value = HeaderValue::from_str(role)
            .map_err(|e| ClientError::Config(format!("invalid role `{role}`: {e}")))?;
        headers.insert(HeaderName::from_static(ROLE_HEADER), value);
    }

    if let Some(secret) = admin_secret {
        let mut value = HeaderValue::from_str(secret.expose_secret())
            .map_err(|e| ClientError::Config(format!("invalid admin secret: {e}")))?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(ADMIN_SECRET_HEADER), value);
    }

    Ok(headers)
}
