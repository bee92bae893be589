//! TOML transcoding: convert yamlite values to TOML text.
//!
//! Mapping from yamlite to TOML:
//!   - Value::Null     -> error (TOML has no null)
//!   - Value::Bool     -> TOML boolean
//!   - Value::Number   -> TOML integer when integral, otherwise TOML float
//!   - Value::String   -> TOML string
//!   - Value::Mapping  -> TOML table
//!
//! Lossy edges:
//!   - TOML has no null type; yamlite null values cause an error.
//!   - TOML requires the top-level value to be a table; yamlite documents
//!     always are, but a bare scalar passed in errors.

use libyamlite::{Mapping, Value};
use toml_edit::DocumentMut;

use super::integral;

/// Encode a yamlite Value as a TOML string.
pub fn encode(value: &Value) -> Result<String, String> {
    match value {
        Value::Mapping(m) => {
            let table = mapping_to_table(m)?;
            let mut doc = DocumentMut::new();
            for (key, item) in table.iter() {
                doc[key] = item.clone();
            }
            Ok(doc.to_string())
        }
        _ => Err("TOML requires the top-level value to be a table".to_string()),
    }
}

fn mapping_to_table(m: &Mapping) -> Result<toml_edit::Table, String> {
    let mut table = toml_edit::Table::new();
    for (k, v) in m {
        table.insert(k, value_to_toml(k, v)?);
    }
    Ok(table)
}

fn value_to_toml(key: &str, value: &Value) -> Result<toml_edit::Item, String> {
    let value = match value {
        Value::Null => return Err(format!("TOML has no null type (key {:?})", key)),
        Value::Mapping(m) => return Ok(toml_edit::Item::Table(mapping_to_table(m)?)),
        Value::Bool(b) => toml_edit::Value::Boolean(toml_edit::Formatted::new(*b)),
        Value::Number(n) => match integral(*n) {
            Some(i) => toml_edit::Value::Integer(toml_edit::Formatted::new(i)),
            None => toml_edit::Value::Float(toml_edit::Formatted::new(*n)),
        },
        Value::String(s) => toml_edit::Value::String(toml_edit::Formatted::new(s.clone())),
    };
    Ok(toml_edit::Item::Value(value))
}
