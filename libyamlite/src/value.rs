//! yamlite value representation.

use indexmap::IndexMap;
use std::fmt;

/// An ordered mapping of keys to values.
///
/// Iteration follows insertion order. Assigning to an existing key replaces
/// its value in place, so the key keeps its original position.
pub type Mapping = IndexMap<String, Value>;

/// A yamlite value.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// Null value (`null`, `~`).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Finite 64-bit floating-point number.
    Number(f64),
    /// UTF-8 string.
    String(String),
    /// Nested mapping.
    Mapping(Mapping),
}

impl Value {
    /// Returns `true` if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a `Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the mapping if this is a `Mapping`.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up `key` if this is a `Mapping`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Follows a dot-separated path of keys, e.g. `"api.requestTimeoutMs"`.
    ///
    /// Keys that themselves contain a dot cannot be reached this way; use
    /// [`Value::get`] for those.
    pub fn pointer(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(self, |value, key| value.get(key))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Mapping(m) => f.debug_map().entries(m).finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        let mut api = Mapping::new();
        api.insert("requestTimeoutMs".into(), 20000.into());
        let mut root = Mapping::new();
        root.insert("api".into(), api.into());
        root.insert("title".into(), "Image Search".into());
        Value::Mapping(root)
    }

    #[test]
    fn test_pointer() {
        let v = sample();
        assert_eq!(
            v.pointer("api.requestTimeoutMs").and_then(Value::as_f64),
            Some(20000.0)
        );
        assert_eq!(v.pointer("title").and_then(Value::as_str), Some("Image Search"));
        assert!(v.pointer("api.missing").is_none());
        assert!(v.pointer("title.deeper").is_none());
    }

    #[test]
    fn test_from_option() {
        assert!(Value::from(None::<bool>).is_null());
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
    }

    #[test]
    fn test_debug_keeps_insertion_order() {
        let mut m = Mapping::new();
        m.insert("z".into(), Value::Null);
        m.insert("a".into(), Value::Bool(false));
        assert_eq!(format!("{:?}", Value::Mapping(m)), r#"{"z": null, "a": false}"#);
    }
}
