//! Muninn error types

/// Muninn error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A stored value failed to serialize or deserialize.
    ///
    /// On the read path this means store corruption or a schema/version
    /// mismatch the cache cannot paper over — surfaced to the caller
    /// rather than silently treated as a miss.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store reported a failure.
    ///
    /// Store implementations return this for connection, protocol and
    /// timeout failures. [`ResponseCache`](crate::ResponseCache) never
    /// propagates it — a failing store degrades to miss/no-op.
    #[error("store error: {0}")]
    Store(String),

    /// Parallel input slices disagree in length, or an argument is
    /// otherwise unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Model execution failed, or the executor violated its contract
    /// (e.g. returned the wrong number of batch results).
    #[error("model execution failed: {0}")]
    Executor(String),
}

/// Result type alias for Muninn operations
pub type Result<T> = std::result::Result<T, Error>;
