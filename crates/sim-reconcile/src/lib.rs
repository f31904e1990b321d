//! Identity-based reconciliation of simulation pairs.
//!
//! The store only replaces whole documents, so per-pair operations are
//! expressed as pure functions from the current document to the next one.
//! Both operations drop every pair that [`Pair::belongs_to`] the target id
//! and keep everything else in its original relative order. Unmanaged
//! pairs (empty id) are therefore never touched.
//!
//! An upserted pair is appended at the end rather than written back into
//! the slot of the pair it replaces. Pair order drives match priority in
//! the proxy, so callers must not assume a pair keeps its position across
//! upserts of the same id.

use sim_types::{Pair, SimulationDocument};
use tracing::debug;

/// Insert or replace the pair owned by `id`.
///
/// The result holds every pair of `current` not owned by `id`, followed by
/// `pair` stamped with `id`.
pub fn upsert_by_id(current: &SimulationDocument, id: &str, pair: Pair) -> SimulationDocument {
    let mut pairs = retain_foreign(current, id);
    let replaced = current.pairs().len() - pairs.len();
    pairs.push(pair.with_id(id));
    debug!(id, replaced, pairs = pairs.len(), "pair upserted");
    current.replace_pairs(pairs)
}

/// Remove the pair owned by `id`.
///
/// Idempotent: if nothing belongs to `id` the result equals `current`.
pub fn delete_by_id(current: &SimulationDocument, id: &str) -> SimulationDocument {
    let pairs = retain_foreign(current, id);
    debug!(id, removed = current.pairs().len() - pairs.len(), "pair deleted");
    current.replace_pairs(pairs)
}

fn retain_foreign(current: &SimulationDocument, id: &str) -> Vec<Pair> {
    current
        .pairs()
        .iter()
        .filter(|p| !p.belongs_to(id))
        .cloned()
        .collect()
}
