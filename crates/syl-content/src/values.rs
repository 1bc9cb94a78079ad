//! Lenient readers for hand-written JSON.
//!
//! Course files are authored by hand, so numbers show up as strings, flags as
//! numbers, and fields go missing. These helpers never fail; callers decide
//! whether `None` means "skip" or "default".

use serde_json::{Map, Value};

/// Read an integer from a number or a numeric string.
///
/// Floats are truncated toward zero; booleans read as 0/1.
#[allow(clippy::cast_possible_truncation)]
pub fn safe_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Interpret a correctness flag.
///
/// `true`, non-zero numbers, and the strings `"true"`/`"1"`/`"yes"` are true.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        _ => false,
    }
}

/// A string field, or `None` if absent, null, or not a string.
pub fn string_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// A trimmed string field; missing and non-string values read as `""`.
pub fn trimmed_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a str {
    string_field(obj, key).map_or("", str::trim)
}

/// A non-empty string field.
pub fn non_empty_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    string_field(obj, key)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// An array field; anything else reads as empty.
pub fn array_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}
