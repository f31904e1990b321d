use sim_types::{SimulationDocument, WriteReport};

use crate::error::StoreResult;
use crate::filter::UrlFilter;

/// Transform applied by [`SimulationStore::update`].
pub type Transform<'a> = &'a dyn Fn(&SimulationDocument) -> SimulationDocument;

/// Whole-document simulation storage.
///
/// Implementations must be thread-safe and make every method atomic with
/// respect to every other method. A failed `replace` or `update` leaves the
/// stored document untouched.
pub trait SimulationStore: Send + Sync {
    /// Read the current document.
    ///
    /// Returns an empty document if nothing has been stored yet.
    fn read(&self) -> StoreResult<SimulationDocument>;

    /// Replace the stored document.
    ///
    /// Pairs that fail import validation are skipped and reported as
    /// warnings. Returns `Err` only when nothing was written.
    fn replace(&self, document: SimulationDocument) -> StoreResult<WriteReport>;

    /// Reset to an empty document.
    fn clear(&self) -> StoreResult<()>;

    /// Derive a new document from the current one and store it, holding
    /// the write lock across the whole read-transform-replace sequence.
    fn update(&self, transform: Transform<'_>) -> StoreResult<WriteReport>;

    /// Read only the pairs whose URL matches `url_pattern`.
    ///
    /// Fails with [`StoreError::InvalidFilter`](crate::StoreError::InvalidFilter)
    /// if the pattern does not compile.
    fn read_filtered(&self, url_pattern: &str) -> StoreResult<SimulationDocument> {
        let filter = UrlFilter::compile(url_pattern)?;
        Ok(filter.apply(&self.read()?))
    }
}
