//! Error types for variation model construction and evaluation.

/// Result type for variation model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or evaluating a variation model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// No master sits at the default (all-zero) location.
    #[error("No base master found at the default location")]
    MissingBaseMaster,

    /// Two masters normalize to the same location.
    #[error("Duplicate master location: {0}")]
    DuplicateLocation(String),

    /// A per-master value array does not match the master count.
    #[error("Expected {expected} master values, got {actual}")]
    AxisValueMismatch { expected: usize, actual: usize },

    /// Strict scalar evaluation requires every support axis in the query.
    #[error("Query location has no value for axis '{0}'")]
    MissingAxisValue(String),

    /// A master reordering referenced an out-of-range or repeated index.
    #[error("Master mapping index {index} invalid for {len} masters")]
    InvalidMapping { index: usize, len: usize },
}
