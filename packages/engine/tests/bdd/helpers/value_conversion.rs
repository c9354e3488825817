//! Value conversion helpers for Gherkin data tables
//!
//! Converts string cells from feature files to JSON property values, which
//! the document reader then turns into engine values.

use serde_json::{Map, Value as JsonValue};

/// Suffix on a handler cell marking a handler that stops propagation.
pub const STOP_SUFFIX: &str = " and stop";

/// Convert a Gherkin table cell value to a JSON value.
///
/// Supports:
/// - `true` / `false` -> Bool
/// - `null` -> Null
/// - `""` -> empty string
/// - Integer and float literals -> Number
/// - Cells starting with `{` or `[` -> parsed as JSON
/// - Everything else -> String
pub fn convert_gherkin_value(val: &str) -> JsonValue {
    let trimmed = val.trim();

    match trimmed {
        "true" => return JsonValue::Bool(true),
        "false" => return JsonValue::Bool(false),
        "null" => return JsonValue::Null,
        "\"\"" => return JsonValue::String(String::new()),
        _ => {}
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(json) = serde_json::from_str(trimmed) {
            return json;
        }
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return JsonValue::from(i);
    }

    if let Ok(f) = trimmed.parse::<f64>() {
        return JsonValue::from(f);
    }

    JsonValue::String(trimmed.to_string())
}

/// Parse a two-column Gherkin table into a JSON props object.
///
/// The table format is:
/// ```text
/// | key1 | value1 |
/// | key2 | value2 |
/// ```
pub fn parse_table_to_props(table: &cucumber::gherkin::Table) -> JsonValue {
    let mut props = Map::new();

    for row in &table.rows {
        if row.len() >= 2 {
            let key = row[0].trim().to_string();
            props.insert(key, convert_gherkin_value(&row[1]));
        }
    }

    JsonValue::Object(props)
}

/// Split a handler cell into its name and whether it stops propagation.
pub fn parse_handler_cell(cell: &str) -> (String, bool) {
    match cell.strip_suffix(STOP_SUFFIX) {
        Some(name) => (name.trim().to_string(), true),
        None => (cell.trim().to_string(), false),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::{convert_gherkin_value, parse_handler_cell};
    use serde_json::json;

    #[test]
    fn test_convert_scalars() {
        assert_eq!(convert_gherkin_value("true"), json!(true));
        assert_eq!(convert_gherkin_value(" false "), json!(false));
        assert_eq!(convert_gherkin_value("null"), json!(null));
        assert_eq!(convert_gherkin_value("\"\""), json!(""));
        assert_eq!(convert_gherkin_value("0"), json!(0));
        assert_eq!(convert_gherkin_value("1.5"), json!(1.5));
        assert_eq!(convert_gherkin_value("btn primary"), json!("btn primary"));
    }

    #[test]
    fn test_convert_json_cells() {
        assert_eq!(convert_gherkin_value(r#"{"id": "7"}"#), json!({"id": "7"}));
        assert_eq!(convert_gherkin_value(r#"["a", "b"]"#), json!(["a", "b"]));
        assert_eq!(convert_gherkin_value("{not json"), json!("{not json"));
    }

    #[test]
    fn test_parse_handler_cell() {
        assert_eq!(parse_handler_cell("A"), ("A".to_string(), false));
        assert_eq!(parse_handler_cell("B and stop"), ("B".to_string(), true));
    }
}
