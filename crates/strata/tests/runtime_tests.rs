//! Tests for the runtime surface and collaborator dispatch

use strata::*;

/// Echoing evaluator double: returns the source and name it was handed.
struct EchoEvaluator;

impl Evaluator for EchoEvaluator {
    fn evaluate(&mut self, source: &str, name: &str) -> Value {
        Value::list(vec![Value::text(source), Value::text(name)])
    }
}

/// Codec double: length-prefixed text, enough to observe a round trip.
struct TextCodec;

impl Serializer for TextCodec {
    fn serialize(&mut self, value: &Value) -> Vec<u8> {
        value.as_str().unwrap_or_default().as_bytes().to_vec()
    }

    fn deserialize(&mut self, bytes: &[u8]) -> Value {
        match std::str::from_utf8(bytes) {
            Ok(text) => Value::text(text),
            Err(_) => Value::err_user("malformed payload"),
        }
    }
}

struct CountingQueries {
    selects: usize,
}

impl QueryEngine for CountingQueries {
    fn select(&mut self, _query: &Value) -> Value {
        self.selects += 1;
        Value::I64(self.selects as i64)
    }

    fn update(&mut self, _query: &Value) -> Value {
        Value::Null
    }

    fn insert(&mut self, table: &Value, _rows: &Value) -> Value {
        table.clone()
    }

    fn upsert(&mut self, table: &Value, _key_columns: usize, _rows: &Value) -> Value {
        table.clone()
    }
}

#[test]
fn test_eval_auto_generates_command_names() {
    let mut rt = Runtime::new(RuntimeConfig::default())
        .unwrap()
        .with_evaluator(Box::new(EchoEvaluator));

    let first = rt.eval("1+1", "");
    let second = rt.eval("2+2", "");
    assert_eq!(first.at(1).unwrap().as_str(), Some("cmd:1"));
    assert_eq!(second.at(1).unwrap().as_str(), Some("cmd:2"));
    assert_eq!(rt.command_counter(), 2);

    // An explicit name bypasses the counter
    let named = rt.eval("3+3", "boot.q");
    assert_eq!(named.at(1).unwrap().as_str(), Some("boot.q"));
    assert_eq!(rt.command_counter(), 2);

    rt.reset_command_counter();
    assert_eq!(rt.command_counter(), 0);
}

#[test]
fn test_query_dispatch() {
    let mut rt = Runtime::new(RuntimeConfig::default())
        .unwrap()
        .with_query_engine(Box::new(CountingQueries { selects: 0 }));

    assert_eq!(rt.select(&Value::Null), Value::I64(1));
    assert_eq!(rt.select(&Value::Null), Value::I64(2));
    assert_eq!(rt.update(&Value::Null), Value::Null);
}

#[test]
fn test_serializer_round_trip() {
    let mut rt = Runtime::new(RuntimeConfig::default())
        .unwrap()
        .with_serializer(Box::new(TextCodec));

    let bytes = rt.serialize(&Value::text("payload")).unwrap();
    assert_eq!(rt.deserialize(&bytes), Value::text("payload"));
}

#[test]
fn test_runtime_parse_table_uses_its_interner() {
    let mut rt = Runtime::new(RuntimeConfig::default()).unwrap();
    let table = rt.parse_table(b"a,b\n1,2\n");
    assert!(!table.is_error());
    assert_eq!(table.row_count(), 1);

    let id = rt.symbols().lookup("a").unwrap();
    assert_eq!(table.column(id).at(0).unwrap().as_str(), Some("1"));
}

#[test]
fn test_globals_own_their_values() {
    let mut rt = Runtime::new(RuntimeConfig::default()).unwrap();
    let v = Value::i64_vec(vec![1, 2]);
    let witness = v.clone();

    rt.define("xs", v);
    assert_eq!(witness.refcount(), 2);

    rt.define("xs", Value::Null);
    // Rebinding dropped the runtime's ownership
    assert_eq!(witness.refcount(), 1);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = RuntimeConfig {
        ingest: IngestOptions {
            delimiter: b'\r',
            cell_budget: None,
        },
    };
    assert!(Runtime::new(config).is_err());
}
