//! HTTP management API for simulations.
//!
//! Serves the simulation resource over `/api/v2/simulation`:
//!
//! | Verb | Path | Operation |
//! |---|---|---|
//! | `GET` | `/api/v2/simulation[?urlPattern=..]` | read, optionally filtered |
//! | `PUT` | `/api/v2/simulation` | clear, then replace |
//! | `POST` | `/api/v2/simulation` | replace |
//! | `DELETE` | `/api/v2/simulation` | clear |
//! | `PUT` | `/api/v2/simulation/{id}` | upsert one pair |
//! | `DELETE` | `/api/v2/simulation/{id}` | delete one pair |
//! | `OPTIONS` | `/api/v2/simulation`, `/api/v2/simulation/schema` | capability discovery |
//! | `GET` | `/api/v2/simulation/schema` | body schema |
//!
//! Writes answer with the document as read back afterwards, or with the
//! store's warning report when the write went through with caveats.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod routes;
pub mod server;

pub use auth::{AllowAllAuth, AuthProvider, Credentials, Identity, StaticTokenAuth};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{Reply, SimulationHandler};
pub use router::{build_router, AppState};
pub use routes::Operation;
pub use server::SimServer;
