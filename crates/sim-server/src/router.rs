use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, MethodFilter, MethodRouter};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::auth::{require_auth, AuthProvider};
use crate::handler::{self, SimulationHandler};
use crate::routes::{paths, Operation};

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub handler: SimulationHandler,
    pub auth: Arc<dyn AuthProvider>,
}

/// Build the axum router with all simulation endpoints.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(paths::SIMULATION, method_router(false))
        .route(paths::SIMULATION_ITEM, method_router(true))
        .route(paths::SCHEMA, schema_router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn method_router(has_id: bool) -> MethodRouter<AppState> {
    Operation::entries(has_id).fold(MethodRouter::new(), |router, (method, op)| {
        // Every method in the table is a standard verb.
        let Ok(filter) = MethodFilter::try_from(method.clone()) else {
            return router;
        };
        match op {
            Operation::Capabilities => router.on(filter, handler::simulation_options),
            Operation::Read => router.on(filter, handler::get_simulation),
            Operation::ReplaceAll => router.on(filter, handler::put_simulation),
            Operation::Create => router.on(filter, handler::post_simulation),
            Operation::DeleteAll => router.on(filter, handler::delete_simulation),
            Operation::ReplaceOne => router.on(filter, handler::put_pair),
            Operation::DeleteOne => router.on(filter, handler::delete_pair),
        }
    })
}

/// The schema path shadows the item route for id `schema`, so the item
/// operations are mounted here as well.
fn schema_router() -> MethodRouter<AppState> {
    let base = get(handler::get_schema).options(handler::schema_options);
    Operation::entries(true).fold(base, |router, (method, op)| {
        let Ok(filter) = MethodFilter::try_from(method.clone()) else {
            return router;
        };
        match op {
            Operation::ReplaceOne => router.on(filter, handler::put_schema_pair),
            Operation::DeleteOne => router.on(filter, handler::delete_schema_pair),
            _ => router,
        }
    })
}
