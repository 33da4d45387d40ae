//! Error types for engine operations
//!
//! Internal operations return [`Result`] and propagate with `?`. At the host
//! boundary (`parse_table`, [`Runtime`] calls) an [`EngineError`] is converted
//! into an error [`Value`] so the boundary itself never fails in the
//! exception sense — the host always receives a value it can inspect.
//!
//! [`Runtime`]: crate::runtime::Runtime
//! [`Value`]: crate::value::Value

use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Type mismatch error
    #[error("Type error: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type
        expected: String,
        /// Actual type received
        got: String,
    },

    /// Index outside the addressable range of a vector
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Vector length
        len: usize,
    },

    /// Two structures that must agree in length do not
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Left-hand length
        left: usize,
        /// Right-hand length
        right: usize,
    },

    /// Malformed input from the host (user error, always recoverable)
    #[error("{0}")]
    MalformedInput(String),

    /// An allocation exceeded the configured budget (resource error)
    #[error("Allocation of {requested} cells exceeds budget of {budget}")]
    AllocationLimit {
        /// Cells requested so far
        requested: usize,
        /// Configured cap
        budget: usize,
    },

    /// A call was dispatched to a collaborator that is not installed
    #[error("No {0} collaborator installed")]
    CollaboratorMissing(&'static str),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
