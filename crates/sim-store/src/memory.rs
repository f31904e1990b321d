//! In-memory simulation store.
//!
//! [`InMemorySimulationStore`] keeps the document behind a `RwLock`. It is
//! what the server runs with; persistence is left to other backends.

use std::sync::{PoisonError, RwLock};

use sim_types::{SimulationDocument, WriteReport};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::import::Importer;
use crate::traits::{SimulationStore, Transform};

/// A [`SimulationStore`] holding the document in memory.
#[derive(Debug, Default)]
pub struct InMemorySimulationStore {
    document: RwLock<SimulationDocument>,
    importer: Importer,
}

impl InMemorySimulationStore {
    /// Create an empty store with no pair limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects documents above `max_pairs`.
    pub fn with_max_pairs(max_pairs: usize) -> Self {
        Self {
            document: RwLock::default(),
            importer: Importer::with_max_pairs(max_pairs),
        }
    }

    /// Number of pairs currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        let doc = self.document.read().map_err(poisoned)?;
        Ok(doc.pairs().len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(e: PoisonError<T>) -> StoreError {
    StoreError::LockPoisoned(e.to_string())
}

impl SimulationStore for InMemorySimulationStore {
    fn read(&self) -> StoreResult<SimulationDocument> {
        let doc = self.document.read().map_err(poisoned)?;
        Ok(doc.clone())
    }

    fn replace(&self, document: SimulationDocument) -> StoreResult<WriteReport> {
        let (prepared, report) = self.importer.prepare(document)?;
        let mut doc = self.document.write().map_err(poisoned)?;
        *doc = prepared;
        debug!(pairs = doc.pairs().len(), warnings = report.warnings.len(), "simulation replaced");
        Ok(report)
    }

    fn clear(&self) -> StoreResult<()> {
        let mut doc = self.document.write().map_err(poisoned)?;
        *doc = SimulationDocument::default();
        debug!("simulation cleared");
        Ok(())
    }

    fn update(&self, transform: Transform<'_>) -> StoreResult<WriteReport> {
        let mut doc = self.document.write().map_err(poisoned)?;
        let (prepared, report) = self.importer.prepare(transform(&*doc))?;
        *doc = prepared;
        debug!(pairs = doc.pairs().len(), warnings = report.warnings.len(), "simulation updated");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use sim_types::{FieldMatcher, Pair, RequestMatcher, ResponseDetails};

    fn pair(id: &str, path: &str) -> Pair {
        let request = RequestMatcher {
            destination: vec![FieldMatcher::exact("example.com")],
            path: vec![FieldMatcher::exact(path)],
            ..Default::default()
        };
        Pair::new(request, ResponseDetails::new(200, path)).with_id(id)
    }

    // -----------------------------------------------------------------------
    // Core operations
    // -----------------------------------------------------------------------

    #[test]
    fn empty_store_reads_default_document() {
        let store = InMemorySimulationStore::new();
        assert_eq!(store.read().unwrap(), SimulationDocument::default());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn replace_then_read_round_trips() {
        let store = InMemorySimulationStore::new();
        let doc = SimulationDocument::with_pairs(vec![pair("a", "/a"), pair("", "/b")]);
        let report = store.replace(doc.clone()).unwrap();
        assert!(report.is_clean());
        assert_eq!(store.read().unwrap(), doc);
    }

    #[test]
    fn replace_discards_previous_pairs() {
        let store = InMemorySimulationStore::new();
        store.replace(SimulationDocument::with_pairs(vec![pair("a", "/a")])).unwrap();
        store.replace(SimulationDocument::with_pairs(vec![pair("b", "/b")])).unwrap();
        let ids: Vec<_> = store.read().unwrap().pairs().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn clear_resets_to_empty() {
        let store = InMemorySimulationStore::new();
        store.replace(SimulationDocument::with_pairs(vec![pair("a", "/a")])).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn read_filtered_by_url() {
        let store = InMemorySimulationStore::new();
        store
            .replace(SimulationDocument::with_pairs(vec![pair("a", "/users"), pair("b", "/orders")]))
            .unwrap();
        let doc = store.read_filtered("example\\.com/users").unwrap();
        assert_eq!(doc.pairs().len(), 1);
        assert_eq!(doc.pairs()[0].id, "a");
    }

    #[test]
    fn read_filtered_rejects_bad_pattern() {
        let store = InMemorySimulationStore::new();
        assert!(matches!(
            store.read_filtered("[").unwrap_err(),
            StoreError::InvalidFilter { .. }
        ));
    }

    #[test]
    fn failed_replace_keeps_previous_document() {
        let store = InMemorySimulationStore::with_max_pairs(1);
        let original = SimulationDocument::with_pairs(vec![pair("a", "/a")]);
        store.replace(original.clone()).unwrap();
        let err = store
            .replace(SimulationDocument::with_pairs(vec![pair("b", "/b"), pair("c", "/c")]))
            .unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded { .. }));
        assert_eq!(store.read().unwrap(), original);
    }

    #[test]
    fn replace_reports_warnings() {
        let store = InMemorySimulationStore::new();
        let report = store
            .replace(SimulationDocument::with_pairs(vec![pair("a", "/a"), pair("a", "/dup")]))
            .unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(store.len().unwrap(), 1);
    }

    // -----------------------------------------------------------------------
    // Atomic update
    // -----------------------------------------------------------------------

    #[test]
    fn update_transforms_current_document() {
        let store = InMemorySimulationStore::new();
        store.replace(SimulationDocument::with_pairs(vec![pair("a", "/a")])).unwrap();
        store
            .update(&|doc: &SimulationDocument| {
                let mut pairs = doc.pairs().to_vec();
                pairs.push(pair("b", "/b"));
                doc.replace_pairs(pairs)
            })
            .unwrap();
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn concurrent_updates_lose_nothing() {
        let store = Arc::new(InMemorySimulationStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..25 {
                        let id = format!("{t}-{i}");
                        store
                            .update(&|doc: &SimulationDocument| {
                                let mut pairs = doc.pairs().to_vec();
                                pairs.push(pair(&id, "/x"));
                                doc.replace_pairs(pairs)
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len().unwrap(), 200);
    }
}
