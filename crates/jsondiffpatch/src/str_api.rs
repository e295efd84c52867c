//! String-in/string-out entry points.
//!
//! These wrappers parse their arguments as JSON, run the typed operation and
//! serialize the result. Every failure — unparsable input, malformed delta,
//! text-patch mismatch — collapses into the empty string, as does "no
//! change"; callers that need to tell those apart use the typed API. An
//! empty input string stands in for the JSON string `""`, and an empty patch
//! string for the null delta.

use serde_json::Value;

/// Diff two JSON documents; returns the delta document or `""`.
pub fn diff_str(left: &str, right: &str) -> String {
    let (Some(left), Some(right)) = (parse_value(left), parse_value(right)) else {
        return String::new();
    };
    serialize_non_null(crate::diff(&left, &right))
}

/// Apply a delta document to a JSON document; returns the result or `""`.
pub fn patch_str(left: &str, delta: &str) -> String {
    let (Some(left), Some(delta)) = (parse_value(left), parse_delta(delta)) else {
        return String::new();
    };
    match crate::patch(&left, &delta) {
        Ok(result) => serialize_non_null(result),
        Err(_) => String::new(),
    }
}

/// Reverse a delta document against a JSON document; returns the
/// reconstructed original or `""`.
pub fn unpatch_str(right: &str, delta: &str) -> String {
    let (Some(right), Some(delta)) = (parse_value(right), parse_delta(delta)) else {
        return String::new();
    };
    match crate::unpatch(&right, &delta) {
        Ok(result) => serialize_non_null(result),
        Err(_) => String::new(),
    }
}

fn parse_value(text: &str) -> Option<Value> {
    if text.is_empty() {
        return Some(Value::String(String::new()));
    }
    serde_json::from_str(text).ok()
}

fn parse_delta(text: &str) -> Option<Value> {
    if text.is_empty() {
        return Some(Value::Null);
    }
    serde_json::from_str(text).ok()
}

fn serialize_non_null(value: Value) -> String {
    if value.is_null() {
        return String::new();
    }
    serde_json::to_string(&value).unwrap_or_default()
}
