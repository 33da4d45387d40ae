//! Value representation for the exchange boundary
//!
//! A [`Value`] is the universal unit of data interchange with the host.
//! Values are organized into three tiers:
//! - Atoms: inline scalars with no addressable backing buffer
//! - Vectors: `Arc`-wrapped contiguous buffers of homogeneous elements
//! - Composites: lists, dicts, tables, and errors (nested ownership)
//!
//! Ownership crossing the boundary follows move semantics: a constructor or
//! accessor that returns a `Value` transfers ownership to the caller, and a
//! borrowed parameter never takes ownership. Sharing is explicit via `Clone`,
//! which bumps the reference count on the heap payload; dropping the last
//! owner frees the buffer and releases nested values transitively.

mod composite;
mod display;
mod error;
mod impls;
mod tag;
mod vector;

pub use composite::{DictValue, TableValue};
pub use error::{ErrorCode, ErrorValue};
pub use tag::TypeTag;

use std::sync::Arc;

use crate::interner::SymbolId;

/// A tagged, reference-counted runtime value.
#[derive(Clone)]
pub enum Value {
    /// Absence of a value
    Null,

    // ═══════════════════════════════════════════════════════════════════
    // Atoms (inline, no backing buffer)
    // ═══════════════════════════════════════════════════════════════════
    /// Boolean atom
    Bool(bool),
    /// Byte atom
    Byte(u8),
    /// Single text byte
    Char(u8),
    /// 16-bit integer atom
    I16(i16),
    /// 32-bit integer atom
    I32(i32),
    /// 64-bit integer atom
    I64(i64),
    /// 64-bit float atom
    F64(f64),
    /// 128-bit GUID atom
    Guid(u128),
    /// Date atom (days since the epoch)
    Date(i32),
    /// Time atom (milliseconds since midnight)
    Time(i32),
    /// Timestamp atom (nanoseconds since the epoch)
    Timestamp(i64),
    /// Interned symbol atom
    Symbol(SymbolId),

    // ═══════════════════════════════════════════════════════════════════
    // Vectors (shared contiguous buffers)
    // ═══════════════════════════════════════════════════════════════════
    /// Vector of booleans
    BoolVec(Arc<Vec<bool>>),
    /// Vector of bytes
    ByteVec(Arc<Vec<u8>>),
    /// Vector of chars - the string type
    Text(Arc<String>),
    /// Vector of 16-bit integers
    I16Vec(Arc<Vec<i16>>),
    /// Vector of 32-bit integers
    I32Vec(Arc<Vec<i32>>),
    /// Vector of 64-bit integers
    I64Vec(Arc<Vec<i64>>),
    /// Vector of 64-bit floats
    F64Vec(Arc<Vec<f64>>),
    /// Vector of GUIDs
    GuidVec(Arc<Vec<u128>>),
    /// Vector of dates
    DateVec(Arc<Vec<i32>>),
    /// Vector of times
    TimeVec(Arc<Vec<i32>>),
    /// Vector of timestamps
    TimestampVec(Arc<Vec<i64>>),
    /// Vector of interned symbols
    SymbolVec(Arc<Vec<SymbolId>>),
    /// Heterogeneous list; elements are themselves owned values
    List(Arc<Vec<Value>>),

    // ═══════════════════════════════════════════════════════════════════
    // Composites and errors
    // ═══════════════════════════════════════════════════════════════════
    /// Keys/values pair
    Dict(Arc<DictValue>),
    /// Column-names/columns pair
    Table(Arc<TableValue>),
    /// Structured or user error
    Error(Arc<ErrorValue>),
}
