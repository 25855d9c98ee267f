use cfgprobe_client::ClientError;

/// Why a check failed
#[derive(Debug, thiserror::Error)]
pub enum CheckFailure {
    /// The endpoint answered with a status outside the accepted set
    #[error("expected status {}, got {actual}: {body}", format_statuses(.expected))]
    UnexpectedStatus {
        /// Accepted statuses
        expected: Vec<u16>,
        /// Status received
        actual: u16,
        /// Response body snippet
        body: String,
    },

    /// A report field did not match the fixture
    #[error("field `{field}`: expected {expected}, got {actual}")]
    FieldMismatch {
        /// Dotted field path, e.g. `jwt.claims_format`
        field: &'static str,
        /// Expected value, JSON encoded
        expected: String,
        /// Actual value, JSON encoded
        actual: String,
    },

    /// The 200 body was not a well-formed report
    #[error("malformed response body: {message}: {body}")]
    MalformedBody {
        /// Parser error
        message: String,
        /// Response body snippet
        body: String,
    },

    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(#[from] ClientError),
}

impl CheckFailure {
    pub(crate) fn mismatch<E, A>(field: &'static str, expected: &E, actual: &A) -> Self
    where
        E: serde::Serialize + ?Sized,
        A: serde::Serialize + ?Sized,
    {
        Self::FieldMismatch {
            field,
            expected: encode(expected),
            actual: encode(actual),
        }
    }
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unserializable>".to_owned())
}

fn format_statuses(statuses: &[u16]) -> String {
    statuses
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}
