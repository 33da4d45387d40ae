//! Vector primitives: length, reference counts, zero-copy views, mutation
//!
//! Mutation is copy-on-write: a uniquely owned buffer is written in place,
//! a shared buffer is cloned first (`Arc::make_mut`). Either way the caller
//! observes no partial write on failure - every error is returned before the
//! buffer is touched.
//!
//! A raw view from [`Value::as_bytes`] borrows the value, so a `resize`,
//! reallocating mutation, or release of the value requires the view's borrow
//! to end first.

use std::mem;
use std::sync::Arc;

use crate::error::{EngineError, Result};
use crate::interner::SymbolId;

use super::{TypeTag, Value};

impl Value {
    /// Element count: 1 for atoms, the stored length for vectors, 2 for the
    /// two-element composite encodings, the message length for errors, and 0
    /// for null.
    pub fn len(&self) -> usize {
        match self {
            Value::Null => 0,
            v if v.is_atom() => 1,
            Value::BoolVec(v) => v.len(),
            Value::ByteVec(v) => v.len(),
            Value::Text(s) => s.len(),
            Value::I16Vec(v) => v.len(),
            Value::I32Vec(v) => v.len(),
            Value::I64Vec(v) => v.len(),
            Value::F64Vec(v) => v.len(),
            Value::GuidVec(v) => v.len(),
            Value::DateVec(v) => v.len(),
            Value::TimeVec(v) => v.len(),
            Value::TimestampVec(v) => v.len(),
            Value::SymbolVec(v) => v.len(),
            Value::List(v) => v.len(),
            Value::Dict(_) | Value::Table(_) => 2,
            Value::Error(e) => e.message.as_ref().map_or(0, String::len),
            // is_atom covers every remaining variant
            _ => 1,
        }
    }

    /// Whether the value has length 0.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current number of owners of the heap payload.
    ///
    /// Atoms are inline and always report 1; null reports 0. For heap
    /// variants this is the live `Arc` strong count, so tests can observe
    /// clone/release round-trips.
    pub fn refcount(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::BoolVec(a) => Arc::strong_count(a),
            Value::ByteVec(a) => Arc::strong_count(a),
            Value::Text(a) => Arc::strong_count(a),
            Value::I16Vec(a) => Arc::strong_count(a),
            Value::I32Vec(a) => Arc::strong_count(a),
            Value::I64Vec(a) => Arc::strong_count(a),
            Value::F64Vec(a) => Arc::strong_count(a),
            Value::GuidVec(a) => Arc::strong_count(a),
            Value::DateVec(a) => Arc::strong_count(a),
            Value::TimeVec(a) => Arc::strong_count(a),
            Value::TimestampVec(a) => Arc::strong_count(a),
            Value::SymbolVec(a) => Arc::strong_count(a),
            Value::List(a) => Arc::strong_count(a),
            Value::Dict(a) => Arc::strong_count(a),
            Value::Table(a) => Arc::strong_count(a),
            Value::Error(a) => Arc::strong_count(a),
            _ => 1,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Zero-copy raw views
    // ═══════════════════════════════════════════════════════════════════

    fn raw_parts(&self) -> Option<(*const u8, usize)> {
        Some(match self {
            Value::BoolVec(v) => (v.as_ptr().cast(), v.len()),
            Value::ByteVec(v) => (v.as_ptr(), v.len()),
            Value::Text(s) => (s.as_ptr(), s.len()),
            Value::I16Vec(v) => (v.as_ptr().cast(), v.len() * mem::size_of::<i16>()),
            Value::I32Vec(v) => (v.as_ptr().cast(), v.len() * mem::size_of::<i32>()),
            Value::I64Vec(v) => (v.as_ptr().cast(), v.len() * mem::size_of::<i64>()),
            Value::F64Vec(v) => (v.as_ptr().cast(), v.len() * mem::size_of::<f64>()),
            Value::GuidVec(v) => (v.as_ptr().cast(), v.len() * mem::size_of::<u128>()),
            Value::DateVec(v) => (v.as_ptr().cast(), v.len() * mem::size_of::<i32>()),
            Value::TimeVec(v) => (v.as_ptr().cast(), v.len() * mem::size_of::<i32>()),
            Value::TimestampVec(v) => (v.as_ptr().cast(), v.len() * mem::size_of::<i64>()),
            Value::SymbolVec(v) => (v.as_ptr().cast(), v.len() * mem::size_of::<SymbolId>()),
            _ => return None,
        })
    }

    /// Address of the first element of a flat vector's buffer, with no copy.
    ///
    /// `None` for atoms (no addressable buffer), lists (elements are owned
    /// values, not flat storage), composites, and null. The pointer is valid
    /// only until the value is mutated in a reallocating way or released.
    pub fn data_ptr(&self) -> Option<*const u8> {
        self.raw_parts().map(|(ptr, _)| ptr)
    }

    /// Total byte size of the flat buffer, `len * element_size`. 0 where
    /// [`Value::data_ptr`] is `None`.
    pub fn byte_len(&self) -> usize {
        self.raw_parts().map_or(0, |(_, len)| len)
    }

    /// Borrowed byte view of a flat vector's buffer.
    ///
    /// The borrow keeps the buffer alive and blocks reallocation for the
    /// view's lifetime, which is the safe rendering of the raw-pointer
    /// validity rule.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        let (ptr, len) = self.raw_parts()?;
        // SAFETY: ptr and len describe the live buffer of a Vec or String
        // owned (possibly shared) by self. Every element type here is
        // plain-old-data with its stated width and no interior padding, and
        // the returned slice borrows self, so the buffer cannot be
        // reallocated or freed while the slice exists.
        Some(unsafe { std::slice::from_raw_parts(ptr, len) })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Element access
    // ═══════════════════════════════════════════════════════════════════

    /// Return a newly owned value holding the element at `index`.
    ///
    /// Bounds-checked: an out-of-range index is an error, never an
    /// out-of-bounds access.
    pub fn at(&self, index: usize) -> Result<Value> {
        let len = self.len();
        if !self.is_vector() {
            return Err(EngineError::TypeMismatch {
                expected: "vector".into(),
                got: self.tag().name().into(),
            });
        }
        if index >= len {
            return Err(EngineError::IndexOutOfBounds { index, len });
        }
        Ok(match self {
            Value::BoolVec(v) => Value::Bool(v[index]),
            Value::ByteVec(v) => Value::Byte(v[index]),
            Value::Text(s) => Value::Char(s.as_bytes()[index]),
            Value::I16Vec(v) => Value::I16(v[index]),
            Value::I32Vec(v) => Value::I32(v[index]),
            Value::I64Vec(v) => Value::I64(v[index]),
            Value::F64Vec(v) => Value::F64(v[index]),
            Value::GuidVec(v) => Value::Guid(v[index]),
            Value::DateVec(v) => Value::Date(v[index]),
            Value::TimeVec(v) => Value::Time(v[index]),
            Value::TimestampVec(v) => Value::Timestamp(v[index]),
            Value::SymbolVec(v) => Value::Symbol(v[index]),
            Value::List(v) => v[index].clone(),
            // is_vector ruled everything else out
            _ => unreachable!("at on non-vector"),
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // In-place mutation (copy-on-write)
    // ═══════════════════════════════════════════════════════════════════

    /// Overwrite the element at `index` with `value`, taking ownership of it.
    ///
    /// The element type must match the vector's underlying type; lists
    /// accept any value. On error the vector is unchanged.
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let len = self.len();
        if !self.is_vector() {
            return Err(EngineError::TypeMismatch {
                expected: "vector".into(),
                got: self.tag().name().into(),
            });
        }
        if index >= len {
            return Err(EngineError::IndexOutOfBounds { index, len });
        }
        match (&mut *self, value) {
            (Value::BoolVec(v), Value::Bool(x)) => Arc::make_mut(v)[index] = x,
            (Value::ByteVec(v), Value::Byte(x)) => Arc::make_mut(v)[index] = x,
            (Value::Text(s), Value::Char(c)) => set_text_byte(s, index, c)?,
            (Value::I16Vec(v), Value::I16(x)) => Arc::make_mut(v)[index] = x,
            (Value::I32Vec(v), Value::I32(x)) => Arc::make_mut(v)[index] = x,
            (Value::I64Vec(v), Value::I64(x)) => Arc::make_mut(v)[index] = x,
            (Value::F64Vec(v), Value::F64(x)) => Arc::make_mut(v)[index] = x,
            (Value::GuidVec(v), Value::Guid(x)) => Arc::make_mut(v)[index] = x,
            (Value::DateVec(v), Value::Date(x)) => Arc::make_mut(v)[index] = x,
            (Value::TimeVec(v), Value::Time(x)) => Arc::make_mut(v)[index] = x,
            (Value::TimestampVec(v), Value::Timestamp(x)) => Arc::make_mut(v)[index] = x,
            (Value::SymbolVec(v), Value::Symbol(x)) => Arc::make_mut(v)[index] = x,
            (Value::List(v), x) => Arc::make_mut(v)[index] = x,
            (this, value) => {
                return Err(EngineError::TypeMismatch {
                    expected: this.tag().name().into(),
                    got: value.tag().name().into(),
                })
            }
        }
        Ok(())
    }

    /// Append `value` to the end of the vector, taking ownership of it.
    pub fn push(&mut self, value: Value) -> Result<()> {
        match (&mut *self, value) {
            (Value::BoolVec(v), Value::Bool(x)) => Arc::make_mut(v).push(x),
            (Value::ByteVec(v), Value::Byte(x)) => Arc::make_mut(v).push(x),
            (Value::Text(s), Value::Char(c)) => push_text_byte(s, c)?,
            (Value::I16Vec(v), Value::I16(x)) => Arc::make_mut(v).push(x),
            (Value::I32Vec(v), Value::I32(x)) => Arc::make_mut(v).push(x),
            (Value::I64Vec(v), Value::I64(x)) => Arc::make_mut(v).push(x),
            (Value::F64Vec(v), Value::F64(x)) => Arc::make_mut(v).push(x),
            (Value::GuidVec(v), Value::Guid(x)) => Arc::make_mut(v).push(x),
            (Value::DateVec(v), Value::Date(x)) => Arc::make_mut(v).push(x),
            (Value::TimeVec(v), Value::Time(x)) => Arc::make_mut(v).push(x),
            (Value::TimestampVec(v), Value::Timestamp(x)) => Arc::make_mut(v).push(x),
            (Value::SymbolVec(v), Value::Symbol(x)) => Arc::make_mut(v).push(x),
            (Value::List(v), x) => Arc::make_mut(v).push(x),
            (this, value) => {
                return Err(EngineError::TypeMismatch {
                    expected: if this.is_vector() {
                        this.tag().name().into()
                    } else {
                        "vector".into()
                    },
                    got: value.tag().name().into(),
                })
            }
        }
        Ok(())
    }

    /// Insert `value` at `index`, shifting later elements right.
    /// `index == len` appends.
    pub fn insert(&mut self, index: usize, value: Value) -> Result<()> {
        let len = self.len();
        if !self.is_vector() {
            return Err(EngineError::TypeMismatch {
                expected: "vector".into(),
                got: self.tag().name().into(),
            });
        }
        if index > len {
            return Err(EngineError::IndexOutOfBounds { index, len });
        }
        match (&mut *self, value) {
            (Value::BoolVec(v), Value::Bool(x)) => Arc::make_mut(v).insert(index, x),
            (Value::ByteVec(v), Value::Byte(x)) => Arc::make_mut(v).insert(index, x),
            (Value::Text(s), Value::Char(c)) => insert_text_byte(s, index, c)?,
            (Value::I16Vec(v), Value::I16(x)) => Arc::make_mut(v).insert(index, x),
            (Value::I32Vec(v), Value::I32(x)) => Arc::make_mut(v).insert(index, x),
            (Value::I64Vec(v), Value::I64(x)) => Arc::make_mut(v).insert(index, x),
            (Value::F64Vec(v), Value::F64(x)) => Arc::make_mut(v).insert(index, x),
            (Value::GuidVec(v), Value::Guid(x)) => Arc::make_mut(v).insert(index, x),
            (Value::DateVec(v), Value::Date(x)) => Arc::make_mut(v).insert(index, x),
            (Value::TimeVec(v), Value::Time(x)) => Arc::make_mut(v).insert(index, x),
            (Value::TimestampVec(v), Value::Timestamp(x)) => Arc::make_mut(v).insert(index, x),
            (Value::SymbolVec(v), Value::Symbol(x)) => Arc::make_mut(v).insert(index, x),
            (Value::List(v), x) => Arc::make_mut(v).insert(index, x),
            (this, value) => {
                return Err(EngineError::TypeMismatch {
                    expected: this.tag().name().into(),
                    got: value.tag().name().into(),
                })
            }
        }
        Ok(())
    }

    /// Resize the vector to `new_len`, truncating or extending with the
    /// zero element of the underlying type (null for lists).
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        match self {
            Value::BoolVec(v) => Arc::make_mut(v).resize(new_len, false),
            Value::ByteVec(v) => Arc::make_mut(v).resize(new_len, 0),
            Value::Text(s) => resize_text(s, new_len)?,
            Value::I16Vec(v) => Arc::make_mut(v).resize(new_len, 0),
            Value::I32Vec(v) => Arc::make_mut(v).resize(new_len, 0),
            Value::I64Vec(v) => Arc::make_mut(v).resize(new_len, 0),
            Value::F64Vec(v) => Arc::make_mut(v).resize(new_len, 0.0),
            Value::GuidVec(v) => Arc::make_mut(v).resize(new_len, 0),
            Value::DateVec(v) => Arc::make_mut(v).resize(new_len, 0),
            Value::TimeVec(v) => Arc::make_mut(v).resize(new_len, 0),
            Value::TimestampVec(v) => Arc::make_mut(v).resize(new_len, 0),
            Value::SymbolVec(v) => Arc::make_mut(v).resize(new_len, SymbolId(0)),
            Value::List(v) => Arc::make_mut(v).resize(new_len, Value::Null),
            other => {
                return Err(EngineError::TypeMismatch {
                    expected: "vector".into(),
                    got: other.tag().name().into(),
                })
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Bulk fill (batch population after allocation)
    // ═══════════════════════════════════════════════════════════════════

    /// Bulk-copy up to `min(data.len(), self.len())` elements into an i32
    /// vector. Silent no-op on any other value type.
    ///
    /// This is a deliberately permissive batch-population path used right
    /// after typed allocation, where the tag is correct by construction.
    pub fn fill_i32(&mut self, data: &[i32]) {
        if let Value::I32Vec(v) = self {
            let v = Arc::make_mut(v);
            let n = data.len().min(v.len());
            v[..n].copy_from_slice(&data[..n]);
        }
    }

    /// Bulk-copy into an i64 vector; silent no-op on any other value type.
    pub fn fill_i64(&mut self, data: &[i64]) {
        if let Value::I64Vec(v) = self {
            let v = Arc::make_mut(v);
            let n = data.len().min(v.len());
            v[..n].copy_from_slice(&data[..n]);
        }
    }

    /// Bulk-copy into an f64 vector; silent no-op on any other value type.
    pub fn fill_f64(&mut self, data: &[f64]) {
        if let Value::F64Vec(v) = self {
            let v = Arc::make_mut(v);
            let n = data.len().min(v.len());
            v[..n].copy_from_slice(&data[..n]);
        }
    }
}

/// Overwrite one byte of a text buffer. Both the outgoing and the incoming
/// byte must be ASCII so the buffer stays valid UTF-8.
fn set_text_byte(s: &mut Arc<String>, index: usize, byte: u8) -> Result<()> {
    if !byte.is_ascii() || !s.as_bytes()[index].is_ascii() {
        return Err(EngineError::TypeMismatch {
            expected: "ascii char".into(),
            got: TypeTag::Char.name().into(),
        });
    }
    let s = Arc::make_mut(s);
    // SAFETY: index is in bounds (checked by the caller) and both the byte
    // being replaced and the replacement are ASCII, so the string remains
    // valid UTF-8.
    unsafe {
        s.as_bytes_mut()[index] = byte;
    }
    Ok(())
}

fn push_text_byte(s: &mut Arc<String>, byte: u8) -> Result<()> {
    if !byte.is_ascii() {
        return Err(EngineError::TypeMismatch {
            expected: "ascii char".into(),
            got: TypeTag::Char.name().into(),
        });
    }
    Arc::make_mut(s).push(byte as char);
    Ok(())
}

fn insert_text_byte(s: &mut Arc<String>, index: usize, byte: u8) -> Result<()> {
    if !byte.is_ascii() || !s.is_char_boundary(index) {
        return Err(EngineError::TypeMismatch {
            expected: "ascii char".into(),
            got: TypeTag::Char.name().into(),
        });
    }
    Arc::make_mut(s).insert(index, byte as char);
    Ok(())
}

fn resize_text(s: &mut Arc<String>, new_len: usize) -> Result<()> {
    if new_len < s.len() && !s.is_char_boundary(new_len) {
        return Err(EngineError::MalformedInput(
            "text resize inside a multi-byte char".into(),
        ));
    }
    let s = Arc::make_mut(s);
    if new_len < s.len() {
        s.truncate(new_len);
    } else {
        let grow = new_len - s.len();
        s.extend(std::iter::repeat('\0').take(grow));
    }
    Ok(())
}
