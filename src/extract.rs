//! Field extraction from heterogeneous JSON responses.
//!
//! Every source describes where its temperature lives with an ordered list
//! of keys (`result_keys`). The walk is duck-typed: each step treats the
//! current node as a JSON mapping and looks the key up in it.

use crate::models::Reading;
use serde_json::Value;

/// Walks `result_keys` through `response` and returns the temperature found
/// at the end of the path, or `Missing`.
///
/// An absent or empty response and an empty key path both yield `Missing`.
/// A lookup that misses (key not present, or the current node is not a
/// mapping) sets the current node to absent, and the walk keeps stepping
/// through the remaining keys against that absent node rather than
/// short-circuiting. The end result is the same, but the walk shape is an
/// intentional, long-standing behavior of this pipeline and is pinned by
/// tests below.
pub fn extract(response: Option<&Value>, result_keys: &[String]) -> Reading {
    let root = match response {
        Some(value) if !is_empty_response(value) => value,
        _ => return Reading::Missing,
    };

    if result_keys.is_empty() {
        return Reading::Missing;
    }

    let mut current: Option<&Value> = Some(root);
    for key in result_keys {
        current = match current {
            Some(Value::Object(map)) => map.get(key),
            // Absent or non-mapping node: stay absent for the rest of the walk.
            _ => None,
        };
    }

    match current {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => Reading::Value(v),
            None => Reading::Missing,
        },
        _ => Reading::Missing,
    }
}

/// A response that parsed but carries nothing counts as no response.
fn is_empty_response(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_absent_response_is_missing() {
        assert_eq!(extract(None, &keys(&["main", "temp"])), Reading::Missing);
    }

    #[test]
    fn test_empty_response_is_missing() {
        assert_eq!(extract(Some(&json!(null)), &keys(&["temp"])), Reading::Missing);
        assert_eq!(extract(Some(&json!({})), &keys(&["temp"])), Reading::Missing);
        assert_eq!(extract(Some(&json!([])), &keys(&["temp"])), Reading::Missing);
    }

    #[test]
    fn test_empty_key_path_is_missing() {
        let response = json!({"temp": 12.5});
        assert_eq!(extract(Some(&response), &[]), Reading::Missing);
    }

    #[test]
    fn test_single_key() {
        let response = json!({"temp": 12.5});
        assert_eq!(extract(Some(&response), &keys(&["temp"])), Reading::Value(12.5));
    }

    #[test]
    fn test_nested_path() {
        let response = json!({"main": {"temp": -3.0, "humidity": 81}});
        assert_eq!(
            extract(Some(&response), &keys(&["main", "temp"])),
            Reading::Value(-3.0)
        );
    }

    #[test]
    fn test_integer_temperature() {
        let response = json!({"current": {"temperature": 10}});
        assert_eq!(
            extract(Some(&response), &keys(&["current", "temperature"])),
            Reading::Value(10.0)
        );
    }

    #[test]
    fn test_zero_is_extracted_not_dropped() {
        let response = json!({"temp": 0});
        assert_eq!(extract(Some(&response), &keys(&["temp"])), Reading::Value(0.0));
    }

    // A miss in the middle of the path does not short-circuit; the remaining
    // keys are walked against the absent node and also miss. Intended
    // behavior, not a bug.
    #[test]
    fn test_missing_key_mid_path_stays_missing() {
        let response = json!({"main": {"humidity": 81}});
        assert_eq!(
            extract(Some(&response), &keys(&["main", "temp", "value"])),
            Reading::Missing
        );
    }

    #[test]
    fn test_path_through_non_mapping_is_missing() {
        // "main" resolves to a number; the next key has nothing to index.
        let response = json!({"main": 7});
        assert_eq!(
            extract(Some(&response), &keys(&["main", "temp"])),
            Reading::Missing
        );
    }

    #[test]
    fn test_array_node_is_not_indexable() {
        let response = json!({"current_condition": [{"temp_C": 9}]});
        assert_eq!(
            extract(Some(&response), &keys(&["current_condition", "temp_C"])),
            Reading::Missing
        );
    }

    #[test]
    fn test_non_numeric_terminal_is_missing() {
        let response = json!({"temp": "12.5"});
        assert_eq!(extract(Some(&response), &keys(&["temp"])), Reading::Missing);
    }
}
