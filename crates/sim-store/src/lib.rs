//! Simulation storage.
//!
//! The store is the sole owner of the current [`SimulationDocument`]. It
//! exposes whole-document operations only; there is no primitive that
//! edits a single pair in place.
//!
//! # Operations
//!
//! - `read` — the current document, or an empty one if nothing was stored
//! - `read_filtered` — only the pairs whose URL matches a regex
//! - `replace` — validate and swap in a new document, returning a [`WriteReport`]
//! - `clear` — reset to an empty document
//! - `update` — atomic read-modify-write under the store's own lock
//!
//! Each operation is atomic on its own. A `read` followed by a `replace`
//! is not: a concurrent writer in between is silently overwritten. Use
//! `update` when the new document is derived from the current one.
//!
//! [`SimulationDocument`]: sim_types::SimulationDocument
//! [`WriteReport`]: sim_types::WriteReport

pub mod error;
pub mod filter;
pub mod import;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use filter::UrlFilter;
pub use import::Importer;
pub use memory::InMemorySimulationStore;
pub use traits::SimulationStore;
