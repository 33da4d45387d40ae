//! End-to-end tests for tabular ingestion

use pretty_assertions::assert_eq;
use strata::*;

fn parse(buffer: &[u8]) -> (Value, SymbolTable) {
    let mut interner = SymbolTable::new();
    let table = parse_table(&mut interner, &IngestOptions::default(), buffer);
    (table, interner)
}

fn column_cells(table: &Value, interner: &SymbolTable, name: &str) -> Vec<String> {
    let id = interner.lookup(name).expect("column name interned");
    let column = table.column(id);
    (0..column.len())
        .map(|i| {
            column
                .at(i)
                .unwrap()
                .as_str()
                .expect("text cell")
                .to_owned()
        })
        .collect()
}

#[test]
fn test_header_only_buffer_yields_zero_row_table() {
    let (table, interner) = parse(b"a,b,c\n");
    assert!(!table.is_error());
    assert_eq!(table.row_count(), 0);

    let names = table.keys();
    assert_eq!(names.len(), 3);
    assert_eq!(
        names,
        Value::symbol_vec(vec![
            interner.lookup("a").unwrap(),
            interner.lookup("b").unwrap(),
            interner.lookup("c").unwrap(),
        ])
    );

    let columns = table.columns();
    for i in 0..columns.len() {
        assert_eq!(columns.at(i).unwrap().len(), 0);
    }
}

#[test]
fn test_basic_two_by_two_parse() {
    let (table, interner) = parse(b"a,b\n1,2\n3,4\n");
    assert!(!table.is_error());
    assert_eq!(table.row_count(), 2);
    assert_eq!(column_cells(&table, &interner, "a"), vec!["1", "3"]);
    assert_eq!(column_cells(&table, &interner, "b"), vec!["2", "4"]);
}

#[test]
fn test_missing_trailing_newline_counts_final_line() {
    let (table, interner) = parse(b"a,b\n1,2\n3,4");
    assert_eq!(table.row_count(), 2);
    assert_eq!(column_cells(&table, &interner, "a"), vec!["1", "3"]);
    assert_eq!(column_cells(&table, &interner, "b"), vec!["2", "4"]);
}

#[test]
fn test_crlf_line_endings_trim_final_field_only() {
    let (table, interner) = parse(b"a,b\r\n1,2\r\n");
    // The header's last field is trimmed, so the column is "b", not "b\r"
    assert!(interner.lookup("b").is_some());
    assert!(interner.lookup("b\r").is_none());
    assert_eq!(column_cells(&table, &interner, "b"), vec!["2"]);
}

#[test]
fn test_cr_inside_a_line_is_not_trimmed() {
    // Carriage-return trimming applies only to the last field of a line
    let (table, interner) = parse(b"a\r,b\nx\r,y\n");
    assert!(interner.lookup("a\r").is_some());
    assert_eq!(column_cells(&table, &interner, "a\r"), vec!["x\r"]);
    assert_eq!(column_cells(&table, &interner, "b"), vec!["y"]);
}

#[test]
fn test_ragged_rows_truncate_extra_and_fill_missing() {
    // Header has 2 columns; first data row has 3 fields, second has 1
    let (table, interner) = parse(b"a,b\n1,2,3\n4\n");
    assert!(!table.is_error());
    assert_eq!(table.row_count(), 2);
    assert_eq!(column_cells(&table, &interner, "a"), vec!["1", "4"]);
    assert_eq!(column_cells(&table, &interner, "b"), vec!["2", ""]);
}

#[test]
fn test_empty_buffer_is_a_user_error() {
    let (result, _) = parse(b"");
    assert!(result.is_error());
    assert_eq!(result.error_code(), Some(ErrorCode::User));
}

#[test]
fn test_empty_fields_survive() {
    let (table, interner) = parse(b"a,b,c\n,mid,\n");
    assert_eq!(column_cells(&table, &interner, "a"), vec![""]);
    assert_eq!(column_cells(&table, &interner, "b"), vec!["mid"]);
    assert_eq!(column_cells(&table, &interner, "c"), vec![""]);
}

#[test]
fn test_column_count_matches_header_delimiters() {
    // 1 + number of delimiters in the header, including empty names
    let (table, _) = parse(b"a,,c\nx,y,z\n");
    assert_eq!(table.keys().len(), 3);
    assert_eq!(table.columns().len(), 3);
}

#[test]
fn test_alternate_delimiter() {
    let mut interner = SymbolTable::new();
    let options = IngestOptions {
        delimiter: b'\t',
        cell_budget: None,
    };
    let table = parse_table(&mut interner, &options, b"a\tb\n1\t2\n");
    assert_eq!(table.row_count(), 1);
    // Commas are ordinary bytes under a tab delimiter
    let table2 = parse_table(&mut interner, &options, b"x,y\n1,2\n");
    assert_eq!(table2.keys().len(), 1);
}

#[test]
fn test_allocation_failure_partway_leaves_no_partial_table() {
    let mut interner = SymbolTable::new();
    // 4 columns x 2 data lines = 8 cells; a budget of 5 fails on column 3
    let options = IngestOptions {
        delimiter: b',',
        cell_budget: Some(5),
    };
    let buffer = b"a,b,c,d\n1,2,3,4\n5,6,7,8\n";
    let result = parse_table(&mut interner, &options, buffer);

    assert!(result.is_error());
    // The out-of-memory shape: a user error with no inline message
    assert_eq!(result.error_code(), Some(ErrorCode::User));
    assert_eq!(result.error_message(), "Out of memory");
    // Only the header symbols were interned; nothing else leaked out
    assert_eq!(interner.len(), 4);

    // The same parse under a sufficient budget succeeds
    let options = IngestOptions {
        delimiter: b',',
        cell_budget: Some(8),
    };
    let table = parse_table(&mut interner, &options, buffer);
    assert!(!table.is_error());
    assert_eq!(table.row_count(), 2);
    // The retry interned nothing new
    assert_eq!(interner.len(), 4);
}

#[test]
fn test_header_symbols_are_deduplicated_across_parses() {
    let mut interner = SymbolTable::new();
    let options = IngestOptions::default();
    parse_table(&mut interner, &options, b"a,b\n1,2\n");
    parse_table(&mut interner, &options, b"a,b\n3,4\n");
    assert_eq!(interner.len(), 2);
}

#[test]
fn test_row_projection_after_parse() {
    let (table, interner) = parse(b"name,city\nada,london\ngrace,dc\n");
    let row = table.row(1);
    let name_col = interner.lookup("name").unwrap();
    assert_eq!(
        row.get(&Value::Symbol(name_col)),
        Value::text("grace")
    );
    assert_eq!(table.row(2), Value::Null);
}
