//! Process-lifetime symbol interning
//!
//! Symbols are deduplicated strings identified by a stable small integer.
//! The table is append-only: a symbol is never mutated and never individually
//! destroyed. The table is explicit state owned by the [`Runtime`] (or by a
//! test directly) rather than an ambient global, so components that intern
//! can be exercised in isolation.
//!
//! [`Runtime`]: crate::runtime::Runtime

use indexmap::IndexSet;

/// A stable identifier for an interned string.
///
/// The id is the insertion index into the owning [`SymbolTable`]. It is a
/// transparent `i64` so symbol vectors have 8-byte elements, which keeps the
/// raw-view byte arithmetic uniform with the other 8-byte vector types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SymbolId(pub i64);

/// An append-only table of deduplicated strings.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexSet<String>,
}

impl SymbolTable {
    /// Create an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its stable id.
    ///
    /// Interning the same string twice returns the same id.
    pub fn intern(&mut self, text: &str) -> SymbolId {
        let (index, _) = self.symbols.insert_full(text.to_owned());
        SymbolId(index as i64)
    }

    /// Look up an already-interned string without interning it.
    pub fn lookup(&self, text: &str) -> Option<SymbolId> {
        self.symbols.get_index_of(text).map(|i| SymbolId(i as i64))
    }

    /// Resolve an id back to its string.
    ///
    /// Returns `None` for ids this table never issued.
    pub fn resolve(&self, id: SymbolId) -> Option<&str> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.symbols.get_index(i))
            .map(String::as_str)
    }

    /// Number of distinct symbols interned so far.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedup() {
        let mut table = SymbolTable::new();
        let a = table.intern("price");
        let b = table.intern("qty");
        let a2 = table.intern("price");

        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_resolve() {
        let mut table = SymbolTable::new();
        let id = table.intern("sym");
        assert_eq!(table.resolve(id), Some("sym"));
        assert_eq!(table.resolve(SymbolId(99)), None);
        assert_eq!(table.resolve(SymbolId(-1)), None);
    }

    #[test]
    fn test_lookup_does_not_intern() {
        let mut table = SymbolTable::new();
        table.intern("a");
        assert_eq!(table.lookup("missing"), None);
        assert_eq!(table.len(), 1);
    }
}
