//! Dotted key-path lookup over configuration documents.
//!
//! Lookups are never errors: any absent segment, or any intermediate value
//! that is not itself a mapping, just yields the caller's default.

use serde_json::Value;

/// Walk `key_path` ("a.b.c") one segment at a time through nested mappings.
pub fn lookup<'a>(doc: &'a Value, key_path: &str) -> Option<&'a Value> {
    let mut current = doc;
    for segment in key_path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// String value at `key_path`, or `default`.
pub fn get_str<'a>(doc: &'a Value, key_path: &str, default: &'a str) -> &'a str {
    lookup(doc, key_path).and_then(Value::as_str).unwrap_or(default)
}

/// Integer value at `key_path`, or `default`.
pub fn get_i64(doc: &Value, key_path: &str, default: i64) -> i64 {
    lookup(doc, key_path).and_then(Value::as_i64).unwrap_or(default)
}

/// Boolean value at `key_path`, or `default`.
pub fn get_bool(doc: &Value, key_path: &str, default: bool) -> bool {
    lookup(doc, key_path).and_then(Value::as_bool).unwrap_or(default)
}

/// Check a document for required key paths, returning the missing ones.
pub fn validate(doc: &Value, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|key| lookup(doc, key).is_none())
        .map(|key| (*key).to_string())
        .collect()
}

// ── tests ────────────────────────────────────────────────────────────
