//! Debugging helpers for templates.
//!
//! `var_dump` prints a value in the layout PHP developers know:
//!
//! ```text
//! array(2) {
//!   ["name"]=>
//!   string(4) "Jack"
//!   ["age"]=>
//!   int(31)
//! }
//! ```

use minijinja::value::ValueKind;
use minijinja::{Environment, Value};
use std::fmt::Write;

/// Register `var_dump` as both a filter and a function.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("var_dump", var_dump);
    env.add_function("var_dump", var_dump);
}

/// Dumps `value` with type and length information.
pub fn var_dump(value: Value) -> String {
    let mut out = String::new();
    dump_into(&mut out, &value, 0);
    out
}

fn dump_into(out: &mut String, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value.kind() {
        ValueKind::Undefined | ValueKind::None => {
            let _ = writeln!(out, "{indent}NULL");
        }
        ValueKind::Bool => {
            let _ = writeln!(out, "{indent}bool({})", value.is_true());
        }
        ValueKind::Number => {
            let repr = value.to_string();
            if repr.parse::<i64>().is_ok() {
                let _ = writeln!(out, "{indent}int({repr})");
            } else {
                let _ = writeln!(out, "{indent}float({repr})");
            }
        }
        ValueKind::String => {
            let s = value.as_str().unwrap_or_default();
            let _ = writeln!(out, "{indent}string({}) \"{s}\"", s.len());
        }
        ValueKind::Bytes => {
            let bytes = value.as_bytes().unwrap_or_default();
            let _ = writeln!(
                out,
                "{indent}string({}) \"{}\"",
                bytes.len(),
                String::from_utf8_lossy(bytes)
            );
        }
        ValueKind::Map => {
            let keys: Vec<Value> = value.try_iter().map(|iter| iter.collect()).unwrap_or_default();
            let _ = writeln!(out, "{indent}array({}) {{", keys.len());
            for key in keys {
                match key.as_str() {
                    Some(name) => {
                        let _ = writeln!(out, "{indent}  [\"{name}\"]=>");
                    }
                    None => {
                        let _ = writeln!(out, "{indent}  [{key}]=>");
                    }
                }
                let item = value.get_item(&key).unwrap_or(Value::UNDEFINED);
                dump_into(out, &item, depth + 1);
            }
            let _ = writeln!(out, "{indent}}}");
        }
        ValueKind::Seq | ValueKind::Iterable => {
            let items: Vec<Value> = value.try_iter().map(|iter| iter.collect()).unwrap_or_default();
            let _ = writeln!(out, "{indent}array({}) {{", items.len());
            for (index, item) in items.iter().enumerate() {
                let _ = writeln!(out, "{indent}  [{index}]=>");
                dump_into(out, item, depth + 1);
            }
            let _ = writeln!(out, "{indent}}}");
        }
        _ => {
            let repr = value.to_string();
            let _ = writeln!(out, "{indent}object({repr})");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(var_dump(Value::from("test")), "string(4) \"test\"\n");
        assert_eq!(var_dump(Value::from(3)), "int(3)\n");
        assert_eq!(var_dump(Value::from(1.5)), "float(1.5)\n");
        assert_eq!(var_dump(Value::from(true)), "bool(true)\n");
        assert_eq!(var_dump(Value::from(())), "NULL\n");
    }

    #[test]
    fn test_string_length_is_bytes() {
        assert_eq!(var_dump(Value::from("é")), "string(2) \"é\"\n");
    }

    #[test]
    fn test_nested() {
        let value = Value::from_iter([("tags", Value::from(vec!["a"]))]);
        assert_eq!(
            var_dump(value),
            "array(1) {\n  [\"tags\"]=>\n  array(1) {\n    [0]=>\n    string(1) \"a\"\n  }\n}\n"
        );
    }
}
