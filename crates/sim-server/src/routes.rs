//! Static verb table for the simulation resource.
//!
//! The operation set is fixed, so dispatch is a lookup in [`OPERATIONS`]
//! keyed by HTTP method and whether the path carries a pair identifier.
//! The router is built from the same table, which keeps the `Allow`
//! header and the mounted handlers in agreement.

use axum::http::Method;

/// HTTP paths served by this crate.
pub mod paths {
    pub const SIMULATION: &str = "/api/v2/simulation";
    pub const SIMULATION_ITEM: &str = "/api/v2/simulation/:id";
    pub const SCHEMA: &str = "/api/v2/simulation/schema";
    /// Last segment of [`SCHEMA`], which is also a legal pair id.
    pub const SCHEMA_SEGMENT: &str = "schema";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Capabilities,
    Read,
    ReplaceAll,
    Create,
    DeleteAll,
    ReplaceOne,
    DeleteOne,
}

/// `(method, has identifier, operation)`, in `Allow` header order.
pub const OPERATIONS: &[(Method, bool, Operation)] = &[
    (Method::OPTIONS, false, Operation::Capabilities),
    (Method::GET, false, Operation::Read),
    (Method::PUT, false, Operation::ReplaceAll),
    (Method::POST, false, Operation::Create),
    (Method::DELETE, false, Operation::DeleteAll),
    (Method::PUT, true, Operation::ReplaceOne),
    (Method::DELETE, true, Operation::DeleteOne),
];

/// Methods served on the schema sub-resource.
pub const SCHEMA_METHODS: &[Method] = &[Method::OPTIONS, Method::GET];

impl Operation {
    pub fn resolve(method: &Method, has_id: bool) -> Option<Self> {
        OPERATIONS
            .iter()
            .find(|(m, id, _)| m == method && *id == has_id)
            .map(|(_, _, op)| *op)
    }

    /// Table entries for the collection (`has_id == false`) or item path.
    pub fn entries(has_id: bool) -> impl Iterator<Item = (&'static Method, Operation)> {
        OPERATIONS
            .iter()
            .filter(move |(_, id, _)| *id == has_id)
            .map(|(m, _, op)| (m, *op))
    }

    /// Value of the `Allow` header for the collection path.
    pub fn allow_header() -> String {
        join(Self::entries(false).map(|(m, _)| m))
    }

    pub fn schema_allow_header() -> String {
        join(SCHEMA_METHODS.iter())
    }
}

fn join<'a>(methods: impl Iterator<Item = &'a Method>) -> String {
    methods.map(Method::as_str).collect::<Vec<_>>().join(", ")
}
