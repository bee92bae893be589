//! Encode yamlite values to text.
//!
//! Two output formats are supported: yamlite itself, which reparses to an
//! equal tree, and pretty-printed JSON. Other formats (YAML, TOML, CBOR) are
//! handled by the CLI tool with dedicated libraries.

use crate::scalar::{coerce, unescape_double};
use crate::value::{Mapping, Value};
use thiserror::Error;

/// Output format for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// yamlite (indentation-nested `key: value`)
    Yamlite,
    /// JSON (standard)
    Json,
}

/// Error type for values that cannot be written in the requested format.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// yamlite documents are always a mapping at the root.
    #[error("yamlite documents must have a mapping at the root")]
    RootNotMapping,

    /// The key cannot be written so that it reads back unchanged.
    #[error("Key {0:?} cannot be written as yamlite")]
    UnrepresentableKey(String),

    /// The string cannot be written so that it reads back unchanged.
    #[error("String {0:?} cannot be written as yamlite")]
    UnrepresentableString(String),

    /// NaN and infinities have no textual form in either format.
    #[error("Number {0} is not finite")]
    NonFiniteNumber(f64),
}

/// Encode a value to a string in the specified format.
pub fn encode(value: &Value, format: Format) -> Result<String, EncodeError> {
    match format {
        Format::Yamlite => match value {
            Value::Mapping(m) => {
                let mut out = String::new();
                encode_yamlite(m, 0, &mut out)?;
                Ok(out)
            }
            _ => Err(EncodeError::RootNotMapping),
        },
        Format::Json => encode_json(value, 0),
    }
}

// =============================================================================
// yamlite Encoder
// =============================================================================

fn encode_yamlite(m: &Mapping, indent: usize, out: &mut String) -> Result<(), EncodeError> {
    let pad = "  ".repeat(indent);
    for (k, v) in m {
        out.push_str(&pad);
        out.push_str(&encode_yamlite_key(k)?);
        out.push(':');
        match v {
            Value::Mapping(child) => {
                out.push('\n');
                encode_yamlite(child, indent + 1, out)?;
            }
            scalar => {
                out.push(' ');
                out.push_str(&encode_yamlite_scalar(scalar)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

fn encode_yamlite_scalar(value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(true) => Ok("true".to_string()),
        Value::Bool(false) => Ok("false".to_string()),
        Value::Number(n) => encode_number(*n),
        Value::String(s) => encode_yamlite_string(s),
        Value::Mapping(_) => unreachable!("mappings are written as nested blocks"),
    }
}

fn encode_yamlite_string(s: &str) -> Result<String, EncodeError> {
    // Bare when the coercer would read the text back as this very string
    if !s.contains(['\n', '\r']) && coerce(s) == Value::String(s.to_string()) && !s.is_empty() {
        return Ok(s.to_string());
    }

    if !s.contains('\n') {
        return Ok(format!("'{}'", s));
    }

    // Only line feeds need escaping; the escapes are not reversible for
    // every backslash sequence, so verify before accepting.
    let escaped = s.replace('\n', "\\n");
    if unescape_double(&escaped) == s {
        Ok(format!("\"{}\"", escaped))
    } else {
        Err(EncodeError::UnrepresentableString(s.to_string()))
    }
}

fn encode_yamlite_key(key: &str) -> Result<String, EncodeError> {
    let representable = !key.is_empty()
        && key.trim() == key
        && !key.contains([':', '\n', '\r'])
        && !key.starts_with(['#', '\u{FEFF}']);
    if representable {
        Ok(key.to_string())
    } else {
        Err(EncodeError::UnrepresentableKey(key.to_string()))
    }
}

/// Shortest round-trip decimal form. `f64`'s `Display` never uses exponent
/// notation, so the output always matches the number pattern.
fn encode_number(n: f64) -> Result<String, EncodeError> {
    if n.is_finite() {
        Ok(format!("{}", n))
    } else {
        Err(EncodeError::NonFiniteNumber(n))
    }
}

// =============================================================================
// JSON Encoder
// =============================================================================

fn encode_json(value: &Value, indent: usize) -> Result<String, EncodeError> {
    let pad = "  ".repeat(indent);
    let pad1 = "  ".repeat(indent + 1);

    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(true) => Ok("true".to_string()),
        Value::Bool(false) => Ok("false".to_string()),
        Value::Number(n) => encode_number(*n),
        Value::String(s) => Ok(encode_json_string(s)),
        Value::Mapping(m) => {
            if m.is_empty() {
                return Ok("{}".to_string());
            }
            let items = m
                .iter()
                .map(|(k, v)| {
                    Ok(format!(
                        "{}{}: {}",
                        pad1,
                        encode_json_string(k),
                        encode_json(v, indent + 1)?
                    ))
                })
                .collect::<Result<Vec<String>, EncodeError>>()?;
            Ok(format!("{{\n{}\n{}}}", items.join(",\n"), pad))
        }
    }
}

fn encode_json_string(s: &str) -> String {
    let mut result = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\x08' => result.push_str("\\b"),
            '\x0c' => result.push_str("\\f"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn mapping(entries: Vec<(&str, Value)>) -> Mapping {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn roundtrip(m: &Mapping) -> Mapping {
        let text = encode(&Value::Mapping(m.clone()), Format::Yamlite).unwrap();
        parse(&text).unwrap_or_else(|e| panic!("reparse of {text:?} failed: {e}"))
    }

    #[test]
    fn test_yamlite_layout() {
        let m = mapping(vec![
            (
                "app",
                Value::Mapping(mapping(vec![("title", "Image Search".into())])),
            ),
            ("timeout", 20000.into()),
            ("debug", false.into()),
            ("proxy", Value::Null),
        ]);
        let text = encode(&Value::Mapping(m), Format::Yamlite).unwrap();
        assert_eq!(
            text,
            "app:\n  title: Image Search\ntimeout: 20000\ndebug: false\nproxy: null\n"
        );
    }

    #[test]
    fn test_strings_that_need_quotes() {
        assert_eq!(encode_yamlite_string("true").unwrap(), "'true'");
        assert_eq!(encode_yamlite_string("42").unwrap(), "'42'");
        assert_eq!(encode_yamlite_string("").unwrap(), "''");
        assert_eq!(encode_yamlite_string(" padded ").unwrap(), "' padded '");
        assert_eq!(encode_yamlite_string("'x'").unwrap(), "''x''");
        assert_eq!(encode_yamlite_string("two\nlines").unwrap(), "\"two\\nlines\"");
        assert_eq!(encode_yamlite_string("plain text").unwrap(), "plain text");
    }

    #[test]
    fn test_unrepresentable_string() {
        let err = encode_yamlite_string("a\\nb\nc").unwrap_err();
        assert!(matches!(err, EncodeError::UnrepresentableString(_)));
    }

    #[test]
    fn test_unrepresentable_keys() {
        for key in ["", " a", "a:b", "#a", "a\nb"] {
            assert!(encode_yamlite_key(key).is_err(), "{key:?}");
        }
        assert_eq!(encode_yamlite_key("key with spaces").unwrap(), "key with spaces");
    }

    #[test]
    fn test_root_must_be_mapping() {
        assert_eq!(
            encode(&Value::Bool(true), Format::Yamlite),
            Err(EncodeError::RootNotMapping)
        );
    }

    #[test]
    fn test_non_finite_numbers() {
        let m = Value::Mapping(mapping(vec![("x", f64::NAN.into())]));
        assert!(matches!(
            encode(&m, Format::Yamlite),
            Err(EncodeError::NonFiniteNumber(_))
        ));
        assert!(matches!(
            encode(&m, Format::Json),
            Err(EncodeError::NonFiniteNumber(_))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let m = mapping(vec![
            ("name", "yamlite".into()),
            ("quoted bool", "false".into()),
            ("tilde", "~".into()),
            ("tabbed", "a\tb".into()),
            ("multi", "one\ntwo".into()),
            ("hash", "#not-a-comment".into()),
            ("empty", "".into()),
            ("int", 42.into()),
            ("neg", (-3.5).into()),
            ("small", 0.000001.into()),
            ("big", 1e21.into()),
            ("on", true.into()),
            ("nothing", Value::Null),
            (
                "nested",
                Value::Mapping(mapping(vec![
                    ("empty child", Value::Mapping(Mapping::new())),
                    (
                        "deeper",
                        Value::Mapping(mapping(vec![("leaf", "value: with colon".into())])),
                    ),
                ])),
            ),
            ("after", 1.into()),
        ]);
        assert_eq!(roundtrip(&m), m);
    }

    #[test]
    fn test_json() {
        let m = mapping(vec![
            ("z", Value::Mapping(mapping(vec![("q", "say \"hi\"\n".into())]))),
            ("a", 1.5.into()),
            ("e", Value::Mapping(Mapping::new())),
        ]);
        let json = encode(&Value::Mapping(m), Format::Json).unwrap();
        assert_eq!(
            json,
            "{\n  \"z\": {\n    \"q\": \"say \\\"hi\\\"\\n\"\n  },\n  \"a\": 1.5,\n  \"e\": {}\n}"
        );
    }
}
