//! # Strata
//!
//! An embeddable columnar value engine boundary.
//!
//! Strata is the layer that lets a managed host drive a dynamically-typed,
//! columnar value engine without copying bulk data across the boundary:
//! a tagged, reference-counted [`Value`] model with zero-copy vector views,
//! and a streaming tabular-text ingestion engine that parses untrusted
//! buffers into typed columnar storage with pre-sized allocations and strict
//! error propagation.
//!
//! ## Architecture
//!
//! - **Value Exchange Layer** (`value`): construct, inspect, mutate, share,
//!   and release tagged values; atoms are inline, vectors are shared
//!   contiguous buffers, composites (lists, dicts, tables) nest ownership.
//! - **Tabular Ingestion Engine** (`ingest`): parse a delimited text buffer
//!   into a table value in three passes, failing atomically.
//! - **Runtime** (`runtime`): the host's handle; owns the symbol table and
//!   dispatches to the evaluator/query/codec collaborators behind traits.
//!
//! Ownership across the boundary follows Rust move semantics: returned
//! values are owned by the caller, borrowed parameters are never consumed,
//! and sharing is explicit via `Clone`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ingest;
pub mod interner;
pub mod runtime;
pub mod value;

// Re-export main types
pub use error::{EngineError, Result};
pub use ingest::{parse_table, IngestOptions};
pub use interner::{SymbolId, SymbolTable};
pub use runtime::{Evaluator, QueryEngine, Runtime, RuntimeConfig, Serializer};
pub use value::{DictValue, ErrorCode, ErrorValue, TableValue, TypeTag, Value};

/// Strata version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
