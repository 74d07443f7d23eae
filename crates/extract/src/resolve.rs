//! Best-effort resolution of a single string out of a loosely-typed value.
//!
//! BaniDB is inconsistent about how it ships a translation: sometimes a bare
//! string, sometimes `{"text": ".."}` (or `translation`, or `value`), and
//! sometimes an array of any of those. Nothing in here ever fails, an
//! unrecognised shape is simply "nothing found".

use serde_json::Value;

/// Object fields that may hold the text, in priority order.
pub const RESOLVABLE_FIELDS: [&str; 3] = ["text", "translation", "value"];

/// Resolves the single "best" string from a value.
///
/// 1. A string is returned as-is.
/// 2. An object returns the first of [`RESOLVABLE_FIELDS`] that holds a
///    string. Objects without any of them resolve to `None`.
/// 3. An array returns the first entry that resolves to a non-empty string,
///    skipping everything else.
/// 4. Anything else resolves to `None`.
///
/// # Examples
///
/// ```
/// use banis_extract::resolve;
/// use serde_json::json;
///
/// assert_eq!(resolve(&json!("Truth")), Some("Truth"));
/// assert_eq!(resolve(&json!({"value": "Truth"})), Some("Truth"));
/// assert_eq!(resolve(&json!([{"unknown": 1}, {"text": "Truth"}])), Some("Truth"));
/// assert_eq!(resolve(&json!(42)), None);
/// ```
pub fn resolve(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => RESOLVABLE_FIELDS.iter().find_map(|field| map.get(*field).and_then(Value::as_str)),
        Value::Array(entries) => entries.iter().filter_map(resolve).find(|s| !s.is_empty()),
        _ => None,
    }
}

/// Resolves the first non-empty string from a keyed-by-provider mapping
/// (`{"bdb": .., "ms": ..}`), walking providers in the order the response
/// listed them.
///
/// A value that isn't a mapping is resolved directly, so a language that
/// skipped the provider level still yields its text.
pub fn resolve_providers(value: &Value) -> Option<&str> {
    match value {
        Value::Object(providers) => providers.values().filter_map(resolve).find(|s| !s.is_empty()),
        other => resolve(other).filter(|s| !s.is_empty()),
    }
}
