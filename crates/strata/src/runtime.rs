//! Runtime state and collaborator seams
//!
//! The [`Runtime`] is the host's handle on the engine: it owns the
//! process-lifetime symbol table, the command counter used to name ad-hoc
//! evaluations, a map of global bindings, and the installed collaborators.
//! Creating a runtime is `Runtime::new`; destroying it is dropping it.
//!
//! Collaborators - the expression evaluator, the query planner, and the
//! binary codec - live behind traits. This crate specifies their call
//! surface and assumes their semantics; it ships no implementations beyond
//! test doubles. A call dispatched to an absent collaborator returns a
//! `missing` error value rather than failing.

use indexmap::IndexMap;

use crate::error::{EngineError, Result};
use crate::ingest::{self, IngestOptions};
use crate::interner::SymbolTable;
use crate::value::Value;

// ═══════════════════════════════════════════════════════════════════════
// COLLABORATOR TRAITS
// ═══════════════════════════════════════════════════════════════════════

/// Expression evaluation collaborator.
pub trait Evaluator {
    /// Evaluate `source`, reporting errors against `name`.
    ///
    /// Ownership of the returned value transfers to the caller. A failed
    /// evaluation is reported as an error value, not a panic.
    fn evaluate(&mut self, source: &str, name: &str) -> Value;
}

/// Query planning collaborator (select/update/insert/upsert semantics).
pub trait QueryEngine {
    /// Execute a select query described by a dict value.
    fn select(&mut self, query: &Value) -> Value;

    /// Execute an update query described by a dict value.
    fn update(&mut self, query: &Value) -> Value;

    /// Insert rows into a table value, returning the updated table.
    fn insert(&mut self, table: &Value, rows: &Value) -> Value;

    /// Upsert rows into a table value, matching on the first
    /// `key_columns` columns.
    fn upsert(&mut self, table: &Value, key_columns: usize, rows: &Value) -> Value;
}

/// Binary serialization collaborator.
///
/// The wire format is owned by the collaborator and opaque to this crate;
/// the contract here is only that a well-formed value round-trips.
pub trait Serializer {
    /// Serialize a value to bytes.
    fn serialize(&mut self, value: &Value) -> Vec<u8>;

    /// Deserialize bytes back into a value, or an error value on malformed
    /// input.
    fn deserialize(&mut self, bytes: &[u8]) -> Value;
}

// ═══════════════════════════════════════════════════════════════════════
// RUNTIME
// ═══════════════════════════════════════════════════════════════════════

/// Configuration for constructing a [`Runtime`].
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Ingestion options applied by [`Runtime::parse_table`]
    pub ingest: IngestOptions,
}

/// The engine state a host drives through the boundary.
pub struct Runtime {
    symbols: SymbolTable,
    globals: IndexMap<String, Value>,
    command_counter: i64,
    config: RuntimeConfig,
    evaluator: Option<Box<dyn Evaluator>>,
    queries: Option<Box<dyn QueryEngine>>,
    serializer: Option<Box<dyn Serializer>>,
}

impl Runtime {
    /// Create a runtime from a configuration.
    ///
    /// Rejects configurations that cannot parse anything, such as a line
    /// terminator used as the field delimiter.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        if matches!(config.ingest.delimiter, b'\n' | b'\r') {
            return Err(EngineError::MalformedInput(
                "field delimiter may not be a line terminator".into(),
            ));
        }
        Ok(Self {
            symbols: SymbolTable::new(),
            globals: IndexMap::new(),
            command_counter: 0,
            config,
            evaluator: None,
            queries: None,
            serializer: None,
        })
    }

    /// Install an expression evaluator (builder style).
    pub fn with_evaluator(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Install a query engine (builder style).
    pub fn with_query_engine(mut self, queries: Box<dyn QueryEngine>) -> Self {
        self.queries = Some(queries);
        self
    }

    /// Install a serializer (builder style).
    pub fn with_serializer(mut self, serializer: Box<dyn Serializer>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    // ═══════════════════════════════════════════════════════════════════
    // Evaluation
    // ═══════════════════════════════════════════════════════════════════

    /// Evaluate a command with source tracking.
    ///
    /// An empty `name` auto-generates one from the command counter
    /// (`cmd:1`, `cmd:2`, ...), so every ad-hoc evaluation gets a unique
    /// error location.
    pub fn eval(&mut self, source: &str, name: &str) -> Value {
        let generated;
        let name = if name.is_empty() {
            self.command_counter += 1;
            generated = format!("cmd:{}", self.command_counter);
            generated.as_str()
        } else {
            name
        };
        match self.evaluator.as_mut() {
            Some(evaluator) => evaluator.evaluate(source, name),
            None => Value::from(EngineError::CollaboratorMissing("evaluator")),
        }
    }

    /// Current command counter.
    pub fn command_counter(&self) -> i64 {
        self.command_counter
    }

    /// Reset the command counter to zero.
    pub fn reset_command_counter(&mut self) {
        self.command_counter = 0;
    }

    // ═══════════════════════════════════════════════════════════════════
    // Ingestion
    // ═══════════════════════════════════════════════════════════════════

    /// Parse a delimited text buffer into a table value using this
    /// runtime's interner and ingestion options.
    pub fn parse_table(&mut self, buffer: &[u8]) -> Value {
        ingest::parse_table(&mut self.symbols, &self.config.ingest, buffer)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries and serialization (dispatch to collaborators)
    // ═══════════════════════════════════════════════════════════════════

    /// Execute a select query.
    pub fn select(&mut self, query: &Value) -> Value {
        match self.queries.as_mut() {
            Some(q) => q.select(query),
            None => Value::from(EngineError::CollaboratorMissing("query")),
        }
    }

    /// Execute an update query.
    pub fn update(&mut self, query: &Value) -> Value {
        match self.queries.as_mut() {
            Some(q) => q.update(query),
            None => Value::from(EngineError::CollaboratorMissing("query")),
        }
    }

    /// Insert rows into a table value.
    pub fn insert(&mut self, table: &Value, rows: &Value) -> Value {
        match self.queries.as_mut() {
            Some(q) => q.insert(table, rows),
            None => Value::from(EngineError::CollaboratorMissing("query")),
        }
    }

    /// Upsert rows into a table value.
    pub fn upsert(&mut self, table: &Value, key_columns: usize, rows: &Value) -> Value {
        match self.queries.as_mut() {
            Some(q) => q.upsert(table, key_columns, rows),
            None => Value::from(EngineError::CollaboratorMissing("query")),
        }
    }

    /// Serialize a value to bytes via the installed codec.
    pub fn serialize(&mut self, value: &Value) -> Result<Vec<u8>> {
        match self.serializer.as_mut() {
            Some(s) => Ok(s.serialize(value)),
            None => Err(EngineError::CollaboratorMissing("serializer")),
        }
    }

    /// Deserialize bytes back into a value via the installed codec.
    pub fn deserialize(&mut self, bytes: &[u8]) -> Value {
        match self.serializer.as_mut() {
            Some(s) => s.deserialize(bytes),
            None => Value::from(EngineError::CollaboratorMissing("serializer")),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Globals and interning
    // ═══════════════════════════════════════════════════════════════════

    /// Bind a value to a global name, taking ownership of the value.
    /// Rebinding replaces (and drops) the previous value.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.globals.insert(name.into(), value);
    }

    /// Look up a global binding.
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// Shared view of the symbol table.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Mutable view of the symbol table, for hosts that intern directly.
    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_newline_delimiter() {
        let config = RuntimeConfig {
            ingest: IngestOptions {
                delimiter: b'\n',
                cell_budget: None,
            },
        };
        assert!(Runtime::new(config).is_err());
    }

    #[test]
    fn test_missing_collaborators_fail_soft() {
        let mut rt = Runtime::new(RuntimeConfig::default()).unwrap();
        assert!(rt.eval("1+1", "").is_error());
        assert!(rt.select(&Value::Null).is_error());
        assert!(rt.deserialize(&[]).is_error());
        assert!(rt.serialize(&Value::Null).is_err());
    }

    #[test]
    fn test_globals_rebind() {
        let mut rt = Runtime::new(RuntimeConfig::default()).unwrap();
        rt.define("x", Value::I64(1));
        rt.define("x", Value::I64(2));
        assert_eq!(rt.global("x"), Some(&Value::I64(2)));
        assert_eq!(rt.global("y"), None);
    }
}
