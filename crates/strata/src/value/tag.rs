//! Type tags: the boundary's type-code surface

use std::mem;

use super::Value;

/// The underlying type of a [`Value`], shared between the atom and the
/// vector of that type.
///
/// The boundary's signed-code convention (negative for atoms, positive for
/// vectors) survives only in [`Value::type_code`]; within the crate the tag
/// is structural and the atom/vector distinction is carried by the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Absence of a value
    Null,
    /// Boolean
    Bool,
    /// Unsigned byte
    Byte,
    /// Single text byte; the vector of chars is the string type
    Char,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 64-bit float
    F64,
    /// 128-bit GUID
    Guid,
    /// Days since the epoch
    Date,
    /// Milliseconds since midnight
    Time,
    /// Nanoseconds since the epoch
    Timestamp,
    /// Interned symbol id
    Symbol,
    /// Heterogeneous list of owned values
    List,
    /// Keys/values composite
    Dict,
    /// Column-names/columns composite
    Table,
    /// Error value
    Error,
}

impl TypeTag {
    /// The tag of a value. Defined for every variant, including `Null`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => TypeTag::Null,
            Value::Bool(_) | Value::BoolVec(_) => TypeTag::Bool,
            Value::Byte(_) | Value::ByteVec(_) => TypeTag::Byte,
            Value::Char(_) | Value::Text(_) => TypeTag::Char,
            Value::I16(_) | Value::I16Vec(_) => TypeTag::I16,
            Value::I32(_) | Value::I32Vec(_) => TypeTag::I32,
            Value::I64(_) | Value::I64Vec(_) => TypeTag::I64,
            Value::F64(_) | Value::F64Vec(_) => TypeTag::F64,
            Value::Guid(_) | Value::GuidVec(_) => TypeTag::Guid,
            Value::Date(_) | Value::DateVec(_) => TypeTag::Date,
            Value::Time(_) | Value::TimeVec(_) => TypeTag::Time,
            Value::Timestamp(_) | Value::TimestampVec(_) => TypeTag::Timestamp,
            Value::Symbol(_) | Value::SymbolVec(_) => TypeTag::Symbol,
            Value::List(_) => TypeTag::List,
            Value::Dict(_) => TypeTag::Dict,
            Value::Table(_) => TypeTag::Table,
            Value::Error(_) => TypeTag::Error,
        }
    }

    /// Byte width of one element of a vector with this tag.
    ///
    /// Returns 0 for tags with no element shape (`Null`, `Dict`, `Table`,
    /// `Error`). List elements are owned values, so the width is
    /// `size_of::<Value>()` rather than the original pointer width.
    pub fn element_size(self) -> usize {
        match self {
            TypeTag::Bool | TypeTag::Byte | TypeTag::Char => 1,
            TypeTag::I16 => 2,
            TypeTag::I32 | TypeTag::Date | TypeTag::Time => 4,
            TypeTag::I64 | TypeTag::F64 | TypeTag::Timestamp | TypeTag::Symbol => 8,
            TypeTag::Guid => 16,
            TypeTag::List => mem::size_of::<Value>(),
            TypeTag::Null | TypeTag::Dict | TypeTag::Table | TypeTag::Error => 0,
        }
    }

    /// The canonical name of this tag.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Bool => "bool",
            TypeTag::Byte => "byte",
            TypeTag::Char => "char",
            TypeTag::I16 => "i16",
            TypeTag::I32 => "i32",
            TypeTag::I64 => "i64",
            TypeTag::F64 => "f64",
            TypeTag::Guid => "guid",
            TypeTag::Date => "date",
            TypeTag::Time => "time",
            TypeTag::Timestamp => "timestamp",
            TypeTag::Symbol => "symbol",
            TypeTag::List => "list",
            TypeTag::Dict => "dict",
            TypeTag::Table => "table",
            TypeTag::Error => "error",
        }
    }

    /// The small-integer code for this tag (always non-negative).
    pub fn code(self) -> i8 {
        match self {
            TypeTag::Null => 0,
            TypeTag::Bool => 1,
            TypeTag::Byte => 2,
            TypeTag::Char => 3,
            TypeTag::I16 => 4,
            TypeTag::I32 => 5,
            TypeTag::I64 => 6,
            TypeTag::F64 => 7,
            TypeTag::Guid => 8,
            TypeTag::Date => 9,
            TypeTag::Time => 10,
            TypeTag::Timestamp => 11,
            TypeTag::Symbol => 12,
            TypeTag::List => 13,
            TypeTag::Dict => 14,
            TypeTag::Table => 15,
            TypeTag::Error => 16,
        }
    }

    /// Recover a tag from a small-integer code. The sign is ignored, matching
    /// the convention that `-code` and `+code` name the same underlying type.
    pub fn from_code(code: i8) -> Option<Self> {
        match code.unsigned_abs() {
            0 => Some(TypeTag::Null),
            1 => Some(TypeTag::Bool),
            2 => Some(TypeTag::Byte),
            3 => Some(TypeTag::Char),
            4 => Some(TypeTag::I16),
            5 => Some(TypeTag::I32),
            6 => Some(TypeTag::I64),
            7 => Some(TypeTag::F64),
            8 => Some(TypeTag::Guid),
            9 => Some(TypeTag::Date),
            10 => Some(TypeTag::Time),
            11 => Some(TypeTag::Timestamp),
            12 => Some(TypeTag::Symbol),
            13 => Some(TypeTag::List),
            14 => Some(TypeTag::Dict),
            15 => Some(TypeTag::Table),
            16 => Some(TypeTag::Error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_sizes() {
        assert_eq!(TypeTag::Bool.element_size(), 1);
        assert_eq!(TypeTag::Char.element_size(), 1);
        assert_eq!(TypeTag::I16.element_size(), 2);
        assert_eq!(TypeTag::Date.element_size(), 4);
        assert_eq!(TypeTag::Symbol.element_size(), 8);
        assert_eq!(TypeTag::Guid.element_size(), 16);
        assert_eq!(TypeTag::Table.element_size(), 0);
    }

    #[test]
    fn test_code_round_trip() {
        for tag in [
            TypeTag::Null,
            TypeTag::Bool,
            TypeTag::Byte,
            TypeTag::Char,
            TypeTag::I16,
            TypeTag::I32,
            TypeTag::I64,
            TypeTag::F64,
            TypeTag::Guid,
            TypeTag::Date,
            TypeTag::Time,
            TypeTag::Timestamp,
            TypeTag::Symbol,
            TypeTag::List,
            TypeTag::Dict,
            TypeTag::Table,
            TypeTag::Error,
        ] {
            assert_eq!(TypeTag::from_code(tag.code()), Some(tag));
            assert_eq!(TypeTag::from_code(-tag.code()), Some(tag));
        }
        assert_eq!(TypeTag::from_code(99), None);
    }
}
