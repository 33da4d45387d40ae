//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use crate::error::{EngineError, Result};
use crate::interner::SymbolId;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a text value (a char vector)
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(Arc::new(s.into()))
    }

    /// Create a byte vector value
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::ByteVec(Arc::new(b.into()))
    }

    /// Create a list value
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    /// Create a symbol vector value
    pub fn symbol_vec(ids: Vec<SymbolId>) -> Self {
        Value::SymbolVec(Arc::new(ids))
    }

    /// Create an i64 vector value
    pub fn i64_vec(items: Vec<i64>) -> Self {
        Value::I64Vec(Arc::new(items))
    }

    /// Create an i32 vector value
    pub fn i32_vec(items: Vec<i32>) -> Self {
        Value::I32Vec(Arc::new(items))
    }

    /// Create an f64 vector value
    pub fn f64_vec(items: Vec<f64>) -> Self {
        Value::F64Vec(Arc::new(items))
    }

    /// Allocate a zero-initialized vector of `len` elements of the given
    /// underlying type.
    ///
    /// This is the pre-sizing primitive the ingestion engine builds column
    /// storage with. Tags with no element shape (`Null`, `Dict`, `Table`,
    /// `Error`) cannot be allocated as vectors.
    pub fn vector(tag: TypeTag, len: usize) -> Result<Self> {
        Ok(match tag {
            TypeTag::Bool => Value::BoolVec(Arc::new(vec![false; len])),
            TypeTag::Byte => Value::ByteVec(Arc::new(vec![0; len])),
            TypeTag::Char => Value::Text(Arc::new("\0".repeat(len))),
            TypeTag::I16 => Value::I16Vec(Arc::new(vec![0; len])),
            TypeTag::I32 => Value::I32Vec(Arc::new(vec![0; len])),
            TypeTag::I64 => Value::I64Vec(Arc::new(vec![0; len])),
            TypeTag::F64 => Value::F64Vec(Arc::new(vec![0.0; len])),
            TypeTag::Guid => Value::GuidVec(Arc::new(vec![0; len])),
            TypeTag::Date => Value::DateVec(Arc::new(vec![0; len])),
            TypeTag::Time => Value::TimeVec(Arc::new(vec![0; len])),
            TypeTag::Timestamp => Value::TimestampVec(Arc::new(vec![0; len])),
            TypeTag::Symbol => Value::SymbolVec(Arc::new(vec![SymbolId(0); len])),
            TypeTag::List => Value::List(Arc::new(vec![Value::Null; len])),
            TypeTag::Null | TypeTag::Dict | TypeTag::Table | TypeTag::Error => {
                return Err(EngineError::TypeMismatch {
                    expected: "vector element type".into(),
                    got: tag.name().into(),
                })
            }
        })
    }

    /// Create a dict from a keys vector and a values vector of equal length.
    pub fn dict(keys: Value, values: Value) -> Result<Self> {
        let (kl, vl) = (keys.len(), values.len());
        if kl != vl {
            return Err(EngineError::LengthMismatch { left: kl, right: vl });
        }
        Ok(Value::Dict(Arc::new(DictValue { keys, values })))
    }

    /// Create a table from a symbol vector of column names and a list of
    /// column vectors, one per name.
    pub fn table(names: Value, columns: Value) -> Result<Self> {
        if !matches!(names, Value::SymbolVec(_)) {
            return Err(EngineError::TypeMismatch {
                expected: "symbol vector".into(),
                got: TypeTag::of(&names).name().into(),
            });
        }
        if !matches!(columns, Value::List(_)) {
            return Err(EngineError::TypeMismatch {
                expected: "list".into(),
                got: TypeTag::of(&columns).name().into(),
            });
        }
        let (nl, cl) = (names.len(), columns.len());
        if nl != cl {
            return Err(EngineError::LengthMismatch { left: nl, right: cl });
        }
        Ok(Value::Table(Arc::new(TableValue { names, columns })))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// The underlying type tag of this value.
    pub fn tag(&self) -> TypeTag {
        TypeTag::of(self)
    }

    /// The boundary's signed type code: negative for atoms, positive for
    /// vectors, 0 for null.
    pub fn type_code(&self) -> i8 {
        let code = self.tag().code();
        if self.is_atom() {
            -code
        } else {
            code
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is an atom (a scalar with no backing buffer).
    /// Null is neither an atom nor a vector.
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            Value::Bool(_)
                | Value::Byte(_)
                | Value::Char(_)
                | Value::I16(_)
                | Value::I32(_)
                | Value::I64(_)
                | Value::F64(_)
                | Value::Guid(_)
                | Value::Date(_)
                | Value::Time(_)
                | Value::Timestamp(_)
                | Value::Symbol(_)
        )
    }

    /// Check if value is a vector (a contiguous buffer of elements).
    /// Dicts, tables, and errors are composites, not vectors.
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            Value::BoolVec(_)
                | Value::ByteVec(_)
                | Value::Text(_)
                | Value::I16Vec(_)
                | Value::I32Vec(_)
                | Value::I64Vec(_)
                | Value::F64Vec(_)
                | Value::GuidVec(_)
                | Value::DateVec(_)
                | Value::TimeVec(_)
                | Value::TimestampVec(_)
                | Value::SymbolVec(_)
                | Value::List(_)
        )
    }

    /// Check if value is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as i64 (converts from smaller integer atoms and the integer
    /// temporal encodings)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(n) => Some(*n as i64),
            Value::I16(n) => Some(*n as i64),
            Value::I32(n) => Some(*n as i64),
            Value::I64(n) => Some(*n),
            Value::Date(n) => Some(*n as i64),
            Value::Time(n) => Some(*n as i64),
            Value::Timestamp(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice from a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract symbol id
    pub fn as_symbol(&self) -> Option<SymbolId> {
        match self {
            Value::Symbol(id) => Some(*id),
            _ => None,
        }
    }

    /// Extract list elements as a slice
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,

            // Atoms
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Guid(a), Value::Guid(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,

            // Vectors (element-wise comparison)
            (Value::BoolVec(a), Value::BoolVec(b)) => a == b,
            (Value::ByteVec(a), Value::ByteVec(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::I16Vec(a), Value::I16Vec(b)) => a == b,
            (Value::I32Vec(a), Value::I32Vec(b)) => a == b,
            (Value::I64Vec(a), Value::I64Vec(b)) => a == b,
            (Value::F64Vec(a), Value::F64Vec(b)) => a == b,
            (Value::GuidVec(a), Value::GuidVec(b)) => a == b,
            (Value::DateVec(a), Value::DateVec(b)) => a == b,
            (Value::TimeVec(a), Value::TimeVec(b)) => a == b,
            (Value::TimestampVec(a), Value::TimestampVec(b)) => a == b,
            (Value::SymbolVec(a), Value::SymbolVec(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,

            // Composites
            (Value::Dict(a), Value::Dict(b)) => a.keys == b.keys && a.values == b.values,
            (Value::Table(a), Value::Table(b)) => a.names == b.names && a.columns == b.columns,

            // Errors (by code and message)
            (Value::Error(a), Value::Error(b)) => a == b,

            // Different types are never equal
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Trait Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Byte(n)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::I16(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::I32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

impl From<SymbolId> for Value {
    fn from(id: SymbolId) -> Self {
        Value::Symbol(id)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_constructor() {
        let v = Value::text("hello");
        assert!(matches!(v, Value::Text(_)));
        assert_eq!(v.as_str(), Some("hello"));
    }

    #[test]
    fn test_vector_constructor_pre_sizes() {
        let v = Value::vector(TypeTag::I64, 4).unwrap();
        assert_eq!(v.len(), 4);
        assert_eq!(v.tag(), TypeTag::I64);

        let l = Value::vector(TypeTag::List, 2).unwrap();
        assert_eq!(l.as_list().unwrap(), &[Value::Null, Value::Null]);
    }

    #[test]
    fn test_vector_constructor_rejects_shapeless_tags() {
        assert!(Value::vector(TypeTag::Table, 1).is_err());
        assert!(Value::vector(TypeTag::Null, 1).is_err());
    }

    #[test]
    fn test_dict_constructor_checks_lengths() {
        let keys = Value::symbol_vec(vec![SymbolId(0)]);
        let values = Value::list(vec![Value::I64(1), Value::I64(2)]);
        assert!(matches!(
            Value::dict(keys, values),
            Err(EngineError::LengthMismatch { left: 1, right: 2 })
        ));
    }

    #[test]
    fn test_table_constructor_checks_shape() {
        let names = Value::i64_vec(vec![1]);
        let columns = Value::list(vec![Value::Null]);
        assert!(Value::table(names, columns).is_err());

        let names = Value::symbol_vec(vec![SymbolId(0)]);
        let columns = Value::list(vec![Value::text("col")]);
        assert!(Value::table(names, columns).is_ok());
    }

    #[test]
    fn test_predicates() {
        assert!(Value::Null.is_null());
        assert!(!Value::Null.is_atom());
        assert!(!Value::Null.is_vector());

        assert!(Value::I64(1).is_atom());
        assert!(!Value::I64(1).is_vector());

        assert!(Value::text("x").is_vector());
        assert!(Value::list(vec![]).is_vector());
        assert!(!Value::err_user("e").is_vector());
        assert!(Value::err_user("e").is_error());
    }

    #[test]
    fn test_type_code_sign_convention() {
        assert_eq!(Value::Null.type_code(), 0);
        assert!(Value::I64(1).type_code() < 0);
        assert!(Value::i64_vec(vec![1]).type_code() > 0);
        assert_eq!(
            Value::I64(1).type_code().unsigned_abs(),
            Value::i64_vec(vec![1]).type_code().unsigned_abs()
        );
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i64), Value::I64(42));
        assert_eq!(Value::from("hi"), Value::text("hi"));
        let v: Value = vec![1i64, 2i64].into();
        assert_eq!(v.as_list().unwrap().len(), 2);
    }
}
