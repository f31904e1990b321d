use std::sync::Arc;

use sim_store::{InMemorySimulationStore, SimulationStore};
use tokio::net::TcpListener;

use crate::auth::{AllowAllAuth, AuthProvider, StaticTokenAuth};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::SimulationHandler;
use crate::router::{build_router, AppState};

/// Simulation management server.
pub struct SimServer {
    config: ServerConfig,
    store: Arc<dyn SimulationStore>,
}

impl SimServer {
    /// Server backed by a fresh in-memory store sized from `config`.
    pub fn new(config: ServerConfig) -> Self {
        let store = match config.max_pairs {
            Some(max) => InMemorySimulationStore::with_max_pairs(max),
            None => InMemorySimulationStore::new(),
        };
        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: ServerConfig, store: Arc<dyn SimulationStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn SimulationStore> {
        &self.store
    }

    fn auth(&self) -> Arc<dyn AuthProvider> {
        match &self.config.auth_token {
            Some(token) => Arc::new(StaticTokenAuth::new(token.clone())),
            None => Arc::new(AllowAllAuth),
        }
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let state = AppState {
            handler: SimulationHandler::new(Arc::clone(&self.store)),
            auth: self.auth(),
        };
        build_router(state, self.config.max_body_bytes)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            auth = self.config.auth_token.is_some(),
            "simulation server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
