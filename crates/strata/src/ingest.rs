//! Tabular text ingestion
//!
//! Parses a raw, untrusted text buffer into a table value: a symbol vector
//! of column names plus one pre-sized column per header field. The parse is
//! three logically distinct passes - count lines, split the header, fill the
//! body - because the line and column counts must be known before the
//! fixed-size column storage is allocated.
//!
//! Dialect scope is deliberately narrow: delimiter and line-feed splitting
//! with one trailing carriage-return trimmed from the last field of each
//! line. No quoting, no escaped delimiters.
//!
//! Ingestion either returns a complete table or an error value; a failure at
//! any step drops everything allocated so far, so the caller never observes
//! a partial table.

use crate::error::{EngineError, Result};
use crate::interner::SymbolTable;
use crate::value::{TypeTag, Value};

/// Options controlling a single ingestion call.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Field delimiter byte
    pub delimiter: u8,

    /// Cap on the total number of cells the parse may pre-allocate.
    ///
    /// Exceeding the budget surfaces as the out-of-memory error shape. This
    /// makes the allocation-failure path deterministic for hosts and tests;
    /// `None` leaves allocation unbounded.
    pub cell_budget: Option<usize>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            cell_budget: None,
        }
    }
}

/// Parse a delimited text buffer into a table value.
///
/// Returns a table value on success and an error value on any failure;
/// ownership of the result transfers to the caller. A header-only buffer
/// yields a table with zero-row columns. A buffer whose last byte is not a
/// line feed still has its final partial line parsed.
pub fn parse_table(interner: &mut SymbolTable, options: &IngestOptions, buffer: &[u8]) -> Value {
    match parse_table_inner(interner, options, buffer) {
        Ok(table) => table,
        Err(err) => Value::from(err),
    }
}

fn parse_table_inner(
    interner: &mut SymbolTable,
    options: &IngestOptions,
    buffer: &[u8],
) -> Result<Value> {
    // Step 1: validate
    if buffer.is_empty() {
        return Err(EngineError::MalformedInput(
            "input buffer is empty".into(),
        ));
    }

    // Step 2: count lines; a trailing partial line counts too
    let mut line_count = buffer.iter().filter(|&&b| b == b'\n').count();
    if buffer.last() != Some(&b'\n') {
        line_count += 1;
    }

    // Step 3 + 4: header split and field extraction share one delimiter
    // scan, so the column count and the extracted fields cannot disagree
    let header_end = buffer.iter().position(|&b| b == b'\n');
    let header = &buffer[..header_end.unwrap_or(buffer.len())];
    let body = header_end.map_or(&[][..], |end| &buffer[end + 1..]);

    let mut names = Vec::new();
    let fields = split_fields(header, options.delimiter);
    for field in &fields {
        names.push(interner.intern(&String::from_utf8_lossy(field)));
    }
    let column_count = names.len();
    let data_line_count = line_count.saturating_sub(1);

    // Step 5: pre-size one list column per header field; a budget overrun
    // partway through drops the columns allocated so far
    let mut columns = Vec::with_capacity(column_count);
    let mut cells = 0usize;
    for _ in 0..column_count {
        cells += data_line_count;
        if let Some(budget) = options.cell_budget {
            if cells > budget {
                return Err(EngineError::AllocationLimit {
                    requested: cells,
                    budget,
                });
            }
        }
        columns.push(Value::vector(TypeTag::List, data_line_count)?);
    }

    // Step 6: body parse
    if data_line_count > 0 && !body.is_empty() {
        fill_columns(&mut columns, body, options.delimiter, data_line_count)?;
    }

    // Step 7: table construction
    Value::table(Value::symbol_vec(names), Value::list(columns))
}

/// Fill pre-allocated columns from the data lines of `body`.
///
/// Every column has every row written: a row with more fields than columns
/// has the extra fields ignored, and a row with fewer has the remaining
/// columns filled with empty text.
fn fill_columns(
    columns: &mut [Value],
    body: &[u8],
    delimiter: u8,
    data_line_count: usize,
) -> Result<()> {
    for (row, line) in body.split(|&b| b == b'\n').take(data_line_count).enumerate() {
        let fields = split_fields(line, delimiter);
        for (index, column) in columns.iter_mut().enumerate() {
            let cell = match fields.get(index) {
                Some(field) => Value::text(String::from_utf8_lossy(field).into_owned()),
                None => Value::text(""),
            };
            column.set(row, cell)?;
        }
    }
    Ok(())
}

/// Split one line on the delimiter, trimming a single trailing carriage
/// return from the final field only.
fn split_fields(line: &[u8], delimiter: u8) -> Vec<&[u8]> {
    let mut fields: Vec<&[u8]> = line.split(|&b| b == delimiter).collect();
    if let Some(last) = fields.last_mut() {
        if let Some(trimmed) = last.strip_suffix(b"\r") {
            *last = trimmed;
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_trims_final_cr_only() {
        assert_eq!(split_fields(b"a,b\r", b','), vec![&b"a"[..], &b"b"[..]]);
        // A CR next to a delimiter is not special-cased
        assert_eq!(
            split_fields(b"a\r,b", b','),
            vec![&b"a\r"[..], &b"b"[..]]
        );
    }

    #[test]
    fn test_split_fields_counts_match_delimiters() {
        assert_eq!(split_fields(b"a,b,c", b',').len(), 3);
        assert_eq!(split_fields(b"", b',').len(), 1);
        assert_eq!(split_fields(b",,", b',').len(), 3);
    }

    #[test]
    fn test_empty_buffer_is_user_error() {
        let mut interner = SymbolTable::new();
        let result = parse_table(&mut interner, &IngestOptions::default(), b"");
        assert!(result.is_error());
    }
}
