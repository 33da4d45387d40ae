//! Composite encodings: dicts and tables
//!
//! A dict pairs a keys vector with a values vector of the same length; a
//! table pairs a symbol vector of column names with a list of column
//! vectors. The projections here are read-only and return newly owned
//! values. They fail closed: given a value of the wrong shape they return
//! [`Value::Null`] rather than misinterpreting the payload.

use std::sync::Arc;

use crate::interner::SymbolId;

use super::Value;

/// The payload of a dict value.
#[derive(Debug, Clone)]
pub struct DictValue {
    /// Keys vector
    pub keys: Value,
    /// Values vector, same length as `keys`
    pub values: Value,
}

/// The payload of a table value.
#[derive(Debug, Clone)]
pub struct TableValue {
    /// Symbol vector of column names
    pub names: Value,
    /// List of column vectors, one per name
    pub columns: Value,
}

impl Value {
    /// The keys of a dict, or the column names of a table.
    pub fn keys(&self) -> Value {
        match self {
            Value::Dict(d) => d.keys.clone(),
            Value::Table(t) => t.names.clone(),
            _ => Value::Null,
        }
    }

    /// The values of a dict, or the column list of a table.
    pub fn values(&self) -> Value {
        match self {
            Value::Dict(d) => d.values.clone(),
            Value::Table(t) => t.columns.clone(),
            _ => Value::Null,
        }
    }

    /// Look up a dict value by key.
    pub fn get(&self, key: &Value) -> Value {
        let Value::Dict(d) = self else {
            return Value::Null;
        };
        for index in 0..d.keys.len() {
            match d.keys.at(index) {
                Ok(k) if &k == key => return d.values.at(index).unwrap_or(Value::Null),
                _ => {}
            }
        }
        Value::Null
    }

    /// The column list of a table.
    pub fn columns(&self) -> Value {
        match self {
            Value::Table(t) => t.columns.clone(),
            _ => Value::Null,
        }
    }

    /// A table column by its interned name symbol.
    pub fn column(&self, name: SymbolId) -> Value {
        let Value::Table(t) = self else {
            return Value::Null;
        };
        let Value::SymbolVec(names) = &t.names else {
            return Value::Null;
        };
        match names.iter().position(|&id| id == name) {
            Some(index) => t.columns.at(index).unwrap_or(Value::Null),
            None => Value::Null,
        }
    }

    /// A table row as a dict of column names to cell values.
    pub fn row(&self, index: usize) -> Value {
        let Value::Table(t) = self else {
            return Value::Null;
        };
        if index >= self.row_count() {
            return Value::Null;
        }
        let Value::List(columns) = &t.columns else {
            return Value::Null;
        };
        let cells: Vec<Value> = columns
            .iter()
            .map(|col| col.at(index).unwrap_or(Value::Null))
            .collect();
        Value::Dict(Arc::new(DictValue {
            keys: t.names.clone(),
            values: Value::list(cells),
        }))
    }

    /// Number of rows in a table: the length of the first column, 0 when the
    /// table has no columns. 0 for non-tables.
    pub fn row_count(&self) -> usize {
        let Value::Table(t) = self else {
            return 0;
        };
        match t.columns.as_list() {
            Some([first, ..]) => first.len(),
            _ => 0,
        }
    }
}
