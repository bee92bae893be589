//! Scalar coercion.
//!
//! Value text is trimmed and classified in a fixed priority order: empty,
//! quoted string, boolean, null, number, and finally the raw text itself.
//! Quoting is checked before any type inference, so quoting a value keeps
//! it a string.

use crate::value::Value;

/// Classify and convert the text after a key's colon.
pub fn coerce(raw: &str) -> Value {
    let value = raw.trim();
    if value.is_empty() {
        return Value::String(String::new());
    }

    if let Some(s) = unquote(value) {
        return Value::String(s);
    }

    if value.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if value.eq_ignore_ascii_case("null") || value == "~" {
        return Value::Null;
    }

    if is_number(value) {
        if let Ok(n) = value.parse::<f64>() {
            if n.is_finite() {
                return Value::Number(n);
            }
        }
    }

    Value::String(value.to_string())
}

/// Strip matching outer quotes. Double-quoted text gets escape processing.
fn unquote(value: &str) -> Option<String> {
    if value.len() < 2 {
        return None;
    }
    if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return Some(unescape_double(inner));
    }
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .map(str::to_string)
}

/// Apply the four supported escapes, each over the result of the previous.
pub(crate) fn unescape_double(s: &str) -> String {
    s.replace("\\\"", "\"")
        .replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\\\", "\\")
}

/// `-?[0-9]+(\.[0-9]+)?`
fn is_number(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.map_or(true, all_digits)
}
