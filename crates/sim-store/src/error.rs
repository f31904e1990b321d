/// Errors from simulation store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The URL filter pattern is not a valid regular expression.
    #[error("invalid url pattern {pattern:?}: {reason}")]
    InvalidFilter { pattern: String, reason: String },

    /// The document holds more pairs than the store accepts.
    #[error("simulation has {pairs} pairs, store accepts at most {max}")]
    CapacityExceeded { pairs: usize, max: usize },

    /// A writer panicked while holding the document lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
