//! Debug and Display implementations for Value

use std::fmt;

use super::*;

fn fmt_seq<T: fmt::Debug>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", item)?;
    }
    write!(f, "]")
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Byte(n) => write!(f, "0x{:02x}", n),
            Value::Char(c) => write!(f, "'{}'", *c as char),
            Value::I16(n) => write!(f, "{}i16", n),
            Value::I32(n) => write!(f, "{}i32", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::Guid(g) => write!(f, "{:032x}", g),
            Value::Date(d) => write!(f, "date({})", d),
            Value::Time(t) => write!(f, "time({})", t),
            Value::Timestamp(ts) => write!(f, "timestamp({})", ts),
            Value::Symbol(id) => write!(f, "`{}", id.0),

            Value::BoolVec(v) => fmt_seq(f, v),
            Value::ByteVec(v) => write!(f, "0x{}", hex(v)),
            Value::Text(s) => write!(f, "{:?}", s.as_str()),
            Value::I16Vec(v) => fmt_seq(f, v),
            Value::I32Vec(v) => fmt_seq(f, v),
            Value::I64Vec(v) => fmt_seq(f, v),
            Value::F64Vec(v) => fmt_seq(f, v),
            Value::GuidVec(v) => fmt_seq(f, v),
            Value::DateVec(v) => fmt_seq(f, v),
            Value::TimeVec(v) => fmt_seq(f, v),
            Value::TimestampVec(v) => fmt_seq(f, v),
            Value::SymbolVec(v) => {
                write!(f, "`[")?;
                for (i, id) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", id.0)?;
                }
                write!(f, "]")
            }
            Value::List(items) => fmt_seq(f, items),

            Value::Dict(d) => write!(f, "dict({:?}; {:?})", d.keys, d.values),
            Value::Table(t) => write!(f, "table({:?}; {:?})", t.names, t.columns),
            Value::Error(e) => write!(f, "error[{}]: {}", e.code.name(), self.error_message()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display is more user-friendly, Debug is more detailed
        match self {
            Value::Text(s) => write!(f, "{}", s.as_ref()),
            Value::Char(c) => write!(f, "{}", *c as char),
            Value::Error(_) => write!(f, "{}", self.error_message()),
            _ => fmt::Debug::fmt(self, f),
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_unquoted() {
        assert_eq!(Value::text("hi").to_string(), "hi");
        assert_eq!(format!("{:?}", Value::text("hi")), "\"hi\"");
    }

    #[test]
    fn test_display_error() {
        assert_eq!(Value::err_user("bad input").to_string(), "bad input");
    }

    #[test]
    fn test_debug_vectors() {
        assert_eq!(format!("{:?}", Value::i64_vec(vec![1, 2])), "[1, 2]");
        assert_eq!(format!("{:?}", Value::bytes(vec![0xde, 0xad])), "0xdead");
    }
}
