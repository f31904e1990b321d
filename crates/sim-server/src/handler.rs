use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use sim_reconcile::{delete_by_id, upsert_by_id};
use sim_store::SimulationStore;
use sim_types::{simulation_schema, SimulationDocument, SinglePairView, WriteReport};
use tracing::debug;

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;
use crate::routes::{paths, Operation};

/// What a write operation answers with.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// The document as read back after the write.
    Document(SimulationDocument),
    /// The write went through with caveats; the report replaces the echo.
    Warnings(WriteReport),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Self::Document(doc) => Json(doc).into_response(),
            Self::Warnings(report) => Json(report).into_response(),
        }
    }
}

/// Resource handler for the simulation document.
///
/// Holds no document state of its own; every call goes to the injected
/// store. Per-pair writes go through [`SimulationStore::update`] so that
/// concurrent writers cannot overwrite each other's changes.
#[derive(Clone)]
pub struct SimulationHandler {
    store: Arc<dyn SimulationStore>,
}

impl SimulationHandler {
    pub fn new(store: Arc<dyn SimulationStore>) -> Self {
        Self { store }
    }

    pub fn read(&self, url_pattern: Option<&str>) -> ServerResult<SimulationDocument> {
        let doc = match url_pattern.filter(|p| !p.is_empty()) {
            Some(pattern) => self.store.read_filtered(pattern)?,
            None => self.store.read()?,
        };
        Ok(doc)
    }

    pub fn replace_all(&self, body: &[u8], url_pattern: Option<&str>) -> ServerResult<Reply> {
        let doc = SimulationDocument::from_json_slice(body)?;
        self.store.clear()?;
        let report = self.store.replace(doc).map_err(|e| write_failed(e, body))?;
        self.finish(report, url_pattern)
    }

    pub fn create(&self, body: &[u8], url_pattern: Option<&str>) -> ServerResult<Reply> {
        let doc = SimulationDocument::from_json_slice(body)?;
        let report = self.store.replace(doc).map_err(|e| write_failed(e, body))?;
        self.finish(report, url_pattern)
    }

    pub fn replace_one(&self, id: &str, body: &[u8], url_pattern: Option<&str>) -> ServerResult<Reply> {
        let pair = SinglePairView::from_json_slice(body)?.into_pair(id);
        let report = self
            .store
            .update(&|current: &SimulationDocument| upsert_by_id(current, id, pair.clone()))
            .map_err(|e| write_failed(e, body))?;
        self.finish(report, url_pattern)
    }

    pub fn delete_all(&self, url_pattern: Option<&str>) -> ServerResult<SimulationDocument> {
        self.store.clear()?;
        self.read(url_pattern)
    }

    pub fn delete_one(&self, id: &str, url_pattern: Option<&str>) -> ServerResult<Reply> {
        let report = self
            .store
            .update(&|current: &SimulationDocument| delete_by_id(current, id))
            .map_err(|e| write_failed(e, &[]))?;
        self.finish(report, url_pattern)
    }

    fn finish(&self, report: WriteReport, url_pattern: Option<&str>) -> ServerResult<Reply> {
        if !report.is_clean() {
            return Ok(Reply::Warnings(report));
        }
        self.read(url_pattern).map(Reply::Document)
    }
}

fn write_failed(e: sim_store::StoreError, body: &[u8]) -> ServerError {
    debug!(error = %e, body = %String::from_utf8_lossy(body), "simulation write failed");
    ServerError::Store(e)
}

// ---------------------------------------------------------------------------
// HTTP adapters
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadParams {
    pub url_pattern: Option<String>,
}

impl ReadParams {
    fn pattern(&self) -> Option<&str> {
        self.url_pattern.as_deref()
    }
}

pub async fn get_simulation(
    State(state): State<AppState>,
    Query(params): Query<ReadParams>,
) -> ServerResult<Json<SimulationDocument>> {
    state.handler.read(params.pattern()).map(Json)
}

pub async fn put_simulation(
    State(state): State<AppState>,
    Query(params): Query<ReadParams>,
    body: Bytes,
) -> ServerResult<Reply> {
    state.handler.replace_all(&body, params.pattern())
}

pub async fn post_simulation(
    State(state): State<AppState>,
    Query(params): Query<ReadParams>,
    body: Bytes,
) -> ServerResult<Reply> {
    state.handler.create(&body, params.pattern())
}

pub async fn delete_simulation(
    State(state): State<AppState>,
    Query(params): Query<ReadParams>,
) -> ServerResult<Json<SimulationDocument>> {
    state.handler.delete_all(params.pattern()).map(Json)
}

pub async fn put_pair(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ReadParams>,
    body: Bytes,
) -> ServerResult<Reply> {
    state.handler.replace_one(&id, &body, params.pattern())
}

pub async fn delete_pair(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ReadParams>,
) -> ServerResult<Reply> {
    state.handler.delete_one(&id, params.pattern())
}

pub async fn put_schema_pair(
    State(state): State<AppState>,
    Query(params): Query<ReadParams>,
    body: Bytes,
) -> ServerResult<Reply> {
    state.handler.replace_one(paths::SCHEMA_SEGMENT, &body, params.pattern())
}

pub async fn delete_schema_pair(
    State(state): State<AppState>,
    Query(params): Query<ReadParams>,
) -> ServerResult<Reply> {
    state.handler.delete_one(paths::SCHEMA_SEGMENT, params.pattern())
}

pub async fn simulation_options() -> impl IntoResponse {
    [(header::ALLOW, Operation::allow_header())]
}

pub async fn schema_options() -> impl IntoResponse {
    [(header::ALLOW, Operation::schema_allow_header())]
}

pub async fn get_schema() -> Json<serde_json::Value> {
    Json(simulation_schema())
}
