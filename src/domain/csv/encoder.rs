// ============================================================
// CSV ENCODER
// ============================================================
// Pure record-set -> text conversion. No I/O, no state, deterministic.

use serde_json::Value;

use crate::domain::record::{as_records, cell_text, Record};

/// Encode a record sequence as a CSV document.
///
/// The header row is fixed by the first record's own key order; every
/// later record is projected onto that column list (missing keys render
/// as empty cells, extra keys are dropped). An empty sequence, or a
/// first record with no keys, yields the empty string.
///
/// Headers are always double-quoted; data cells are quoted only when
/// they contain a quote, comma, or newline. Rows are joined with `\n`
/// and the output carries no trailing newline.
pub fn encode(records: &[Value]) -> String {
    let headers = match records.first().and_then(Value::as_object) {
        Some(first) if !first.is_empty() => first.keys().cloned().collect::<Vec<_>>(),
        _ => return String::new(),
    };

    let header_line = headers
        .iter()
        .map(|h| quote_header(h))
        .collect::<Vec<_>>()
        .join(",");

    let data_lines = records
        .iter()
        .map(|record| encode_row(record.as_object(), &headers))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", header_line, data_lines)
}

/// Lenient entry point for host-supplied JSON of unknown shape.
///
/// A value that is not an array degrades to the empty document instead
/// of failing; data that has not loaded yet is an expected input.
pub fn encode_value(records: &Value) -> String {
    encode(as_records(records))
}

fn encode_row(record: Option<&Record>, headers: &[String]) -> String {
    headers
        .iter()
        .map(|header| {
            let text = record
                .and_then(|r| r.get(header))
                .map(cell_text)
                .unwrap_or_default();
            escape_cell(&text)
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a data cell only when it needs it.
fn escape_cell(text: &str) -> String {
    if text.contains('"') || text.contains(',') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Header cells are unconditionally quoted, unlike data cells. The
/// asymmetry is kept for byte-compatibility with existing consumers.
fn quote_header(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_inputs_yield_empty_document() {
        assert_eq!(encode(&[]), "");
        assert_eq!(encode_value(&json!(null)), "");
        assert_eq!(encode_value(&json!("not an array")), "");
        assert_eq!(encode_value(&json!([])), "");
        assert_eq!(encode_value(&json!([{}])), "");
    }

    #[test]
    fn test_header_from_first_record_in_key_order() {
        let records = json!([{"name": "John", "age": 30, "city": "New York"}]);
        let out = encode_value(&records);
        let header = out.lines().next().unwrap();
        assert_eq!(header, "\"name\",\"age\",\"city\"");
    }

    #[test]
    fn test_literal_scenario() {
        let records = json!([
            {"name": "John", "age": 30, "city": "New York"},
            {"name": "Jane", "age": 25, "city": "Los Angeles"}
        ]);
        assert_eq!(
            encode_value(&records),
            "\"name\",\"age\",\"city\"\nJohn,30,New York\nJane,25,Los Angeles"
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        let records = json!([{"a": 1}]);
        assert!(!encode_value(&records).ends_with('\n'));
    }

    #[test]
    fn test_cell_escaping() {
        let records = json!([{"note": "He said \"hi\", then left\n"}]);
        let out = encode_value(&records);
        assert_eq!(out, "\"note\"\n\"He said \"\"hi\"\", then left\n\"");
    }

    #[test]
    fn test_plain_cells_are_not_quoted() {
        let records = json!([{"a": "plain", "b": 1}]);
        assert_eq!(encode_value(&records), "\"a\",\"b\"\nplain,1");
    }

    #[test]
    fn test_missing_key_projects_to_empty_cell() {
        let records = json!([{"a": 1, "b": 2}, {"a": 3}]);
        assert_eq!(encode_value(&records), "\"a\",\"b\"\n1,2\n3,");
    }

    #[test]
    fn test_extra_keys_are_dropped() {
        let records = json!([{"a": 1}, {"a": 2, "b": 9}]);
        assert_eq!(encode_value(&records), "\"a\"\n1\n2");
    }

    #[test]
    fn test_null_value_renders_as_empty_cell() {
        let records = json!([{"a": null, "b": "x"}]);
        assert_eq!(encode_value(&records), "\"a\",\"b\"\n,x");
    }

    #[test]
    fn test_non_object_row_projects_to_empty_cells() {
        let records = json!([{"a": 1, "b": 2}, 42]);
        assert_eq!(encode_value(&records), "\"a\",\"b\"\n1,2\n,");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let records = json!([{"a": 1, "b": "x,y"}, {"a": 2}]);
        assert_eq!(encode_value(&records), encode_value(&records));
    }

    #[test]
    fn test_output_parses_back_with_a_csv_reader() {
        let records = json!([
            {"name": "Ann \"The Hammer\" Lee", "bio": "lines:\none\ntwo", "score": 7},
            {"name": "Bo", "bio": "a,b", "score": 9}
        ]);
        let out = encode_value(&records);

        let mut reader = csv::ReaderBuilder::new().from_reader(out.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers, csv::StringRecord::from(vec!["name", "bio", "score"]));

        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "Ann \"The Hammer\" Lee");
        assert_eq!(&rows[0][1], "lines:\none\ntwo");
        assert_eq!(&rows[1][1], "a,b");
    }
}
