use thiserror::Error;

/// Errors raised while decoding a request body into a simulation type.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("unsupported schema version: {0}")]
    UnsupportedVersion(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidJson(e.to_string())
    }
}

pub type SchemaResult<T> = Result<T, SchemaError>;
