//! YAML transcoding: convert yamlite values to YAML text.
//!
//! Mapping from yamlite to YAML:
//!   - Value::Null     -> YAML null
//!   - Value::Bool     -> YAML bool
//!   - Value::Number   -> YAML integer when integral, otherwise YAML float
//!   - Value::String   -> YAML string (quoted by the emitter when needed)
//!   - Value::Mapping  -> YAML mapping (insertion order kept)

use libyamlite::Value;

use super::integral;

/// Encode a yamlite Value as a YAML string.
pub fn encode(value: &Value) -> Result<String, String> {
    let yaml_value = value_to_yaml(value)?;
    serde_yaml::to_string(&yaml_value).map_err(|e| format!("YAML encode error: {}", e))
}

fn value_to_yaml(value: &Value) -> Result<serde_yaml::Value, String> {
    match value {
        Value::Null => Ok(serde_yaml::Value::Null),
        Value::Bool(b) => Ok(serde_yaml::Value::Bool(*b)),
        Value::Number(n) => match integral(*n) {
            Some(i) => Ok(serde_yaml::Value::Number(serde_yaml::Number::from(i))),
            None => Ok(serde_yaml::Value::Number(serde_yaml::Number::from(*n))),
        },
        Value::String(s) => Ok(serde_yaml::Value::String(s.clone())),
        Value::Mapping(m) => {
            let mut map = serde_yaml::Mapping::new();
            for (k, v) in m {
                map.insert(serde_yaml::Value::String(k.clone()), value_to_yaml(v)?);
            }
            Ok(serde_yaml::Value::Mapping(map))
        }
    }
}
