use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
}

impl Identity {
    pub fn anonymous() -> Self { Self { name: "anonymous".into() } }
    pub fn user(name: impl Into<String>) -> Self { Self { name: name.into() } }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Extract credentials from an `Authorization: Bearer <token>` header.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| Self::Bearer(token.trim().to_string()))
            .unwrap_or(Self::Anonymous)
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity>;
}

pub struct AllowAllAuth;

#[async_trait]
impl AuthProvider for AllowAllAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) => {
                let prefix: String = token.chars().take(8).collect();
                Ok(Identity::user(format!("bearer:{prefix}")))
            }
            Credentials::Anonymous => Ok(Identity::anonymous()),
        }
    }
}

/// Accepts a single pre-shared bearer token.
pub struct StaticTokenAuth {
    token: String,
}

impl StaticTokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) if *token == self.token => Ok(Identity::user("token")),
            Credentials::Bearer(_) => Err(ServerError::Unauthorized("invalid bearer token".into())),
            Credentials::Anonymous => Err(ServerError::Unauthorized("missing bearer token".into())),
        }
    }
}

/// Middleware guarding every route except capability discovery.
pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if *req.method() == Method::OPTIONS {
        return next.run(req).await;
    }
    let credentials = Credentials::from_headers(req.headers());
    match state.auth.authenticate(&credentials).await {
        Ok(identity) => {
            debug!(identity = %identity.name, method = %req.method(), uri = %req.uri(), "request authenticated");
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
