//! Foundation types for simulations.
//!
//! A simulation is an ordered list of request-matcher/response pairs plus
//! document-level metadata. The proxy walks the pairs in order when it
//! fabricates a response, so pair order is significant.
//!
//! # Key Types
//!
//! - [`Pair`] — one request matcher and the response it produces
//! - [`SimulationDocument`] — the full document as stored and exchanged
//! - [`SinglePairView`] — body of a single-pair upsert
//! - [`WriteReport`] — warnings produced while importing a document
//!
//! Pairs carry an optional identifier. An empty identifier marks an
//! unmanaged pair: [`Pair::belongs_to`] never matches it, so identity-based
//! upsert and delete always leave it in place.

pub mod document;
pub mod error;
pub mod pair;
pub mod report;
pub mod schema;

pub use document::{
    Delay, GlobalActions, Meta, SimulationData, SimulationDocument, SinglePairView,
    SCHEMA_VERSION,
};
pub use error::{SchemaError, SchemaResult};
pub use pair::{FieldMatcher, Pair, RequestMatcher, ResponseDetails};
pub use report::WriteReport;
pub use schema::simulation_schema;
