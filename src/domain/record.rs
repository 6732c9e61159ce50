// ============================================================
// RECORD MODEL
// ============================================================
// Flat key-value records as they arrive from the host (JSON)

use serde_json::Value;

/// A single flat record: field name to value, in insertion order.
///
/// serde_json is built with `preserve_order`, so the first record's own
/// key order is exactly the order the header row will use.
pub type Record = serde_json::Map<String, Value>;

/// Canonical text form of a cell value.
///
/// Null renders as the empty cell; strings are taken verbatim (no JSON
/// quoting); numbers and booleans use their canonical display form.
/// Nested arrays and objects are flattened to compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Interpret an arbitrary JSON value as a record sequence.
///
/// Anything that is not an array (null, scalar, object) means "no usable
/// data" and yields an empty slice, per the leniency policy: absent or
/// not-yet-loaded data must never crash a caller.
pub fn as_records(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text_primitives() {
        assert_eq!(cell_text(&json!(null)), "");
        assert_eq!(cell_text(&json!("plain")), "plain");
        assert_eq!(cell_text(&json!(30)), "30");
        assert_eq!(cell_text(&json!(2.5)), "2.5");
        assert_eq!(cell_text(&json!(true)), "true");
    }

    #[test]
    fn test_cell_text_nested_values_flatten_to_json() {
        assert_eq!(cell_text(&json!([1, 2])), "[1,2]");
        assert_eq!(cell_text(&json!({"a": 1})), "{\"a\":1}");
    }

    #[test]
    fn test_as_records_leniency() {
        assert!(as_records(&json!(null)).is_empty());
        assert!(as_records(&json!("not an array")).is_empty());
        assert!(as_records(&json!({"a": 1})).is_empty());
        assert_eq!(as_records(&json!([{"a": 1}])).len(), 1);
    }
}
