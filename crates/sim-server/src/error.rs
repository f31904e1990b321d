use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sim_store::StoreError;
use sim_types::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Malformed or schema-invalid request body.
    #[error("{0}")]
    Validation(#[from] SchemaError),

    /// Invalid `urlPattern` on a read.
    #[error("{0}")]
    Filter(StoreError),

    #[error("An error occurred: {0}")]
    Store(StoreError),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        match e {
            e @ StoreError::InvalidFilter { .. } => Self::Filter(e),
            e => Self::Store(e),
        }
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Filter(_) | Self::Store(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
