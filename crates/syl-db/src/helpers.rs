//! Parameter binding helpers.
//!
//! The upsert engine binds `libsql::Value`s positionally; these keep the
//! conversions (notably booleans to canonical 0/1 integers and absent
//! optional text to SQL NULL) in one place.

use libsql::Value;

/// Bind a TEXT column.
#[must_use]
pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

/// Bind a nullable TEXT column. Only `None` becomes NULL; `""` is stored as given.
#[must_use]
pub fn opt_text(s: Option<&str>) -> Value {
    s.map_or(Value::Null, text)
}

/// Bind a boolean as the canonical 0/1 integer.
#[must_use]
pub const fn flag(b: bool) -> Value {
    Value::Integer(if b { 1 } else { 0 })
}

#[must_use]
pub const fn int(n: i64) -> Value {
    Value::Integer(n)
}
