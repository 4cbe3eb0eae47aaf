use std::collections::HashMap;

use super::ConfigError;

/// A raw configuration value as read from YAML, `.env` files or the process environment.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<ConfigValue>),
    Map(HashMap<String, ConfigValue>),
}

impl From<&serde_yaml::Value> for ConfigValue {
    fn from(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(*b),
            serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => ConfigValue::Integer(i),
                (None, Some(f)) => ConfigValue::Float(f),
                (None, None) => ConfigValue::String(n.to_string()),
            },
            serde_yaml::Value::String(s) => ConfigValue::String(s.clone()),
            serde_yaml::Value::Sequence(seq) => {
                ConfigValue::List(seq.iter().map(ConfigValue::from).collect())
            }
            serde_yaml::Value::Mapping(map) => ConfigValue::Map(
                map.iter()
                    .map(|(k, v)| (yaml_key(k), ConfigValue::from(v)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => ConfigValue::from(&tagged.value),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

/// Render a YAML mapping key as a config key segment.
pub(crate) fn yaml_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => format!("{other:?}"),
    }
}

fn mismatch(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}

/// Conversion from a [`ConfigValue`] into a concrete Rust type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be read from the environment configuration",
    label = "not a config value type",
    note = "every environment property is read as a String"
)]
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError>;
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::String(s) => Ok(s.clone()),
            ConfigValue::Integer(i) => Ok(i.to_string()),
            ConfigValue::Float(f) => Ok(f.to_string()),
            ConfigValue::Bool(b) => Ok(b.to_string()),
            ConfigValue::Null | ConfigValue::List(_) | ConfigValue::Map(_) => {
                Err(mismatch(key, "String"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_accepts_scalars() {
        assert_eq!(
            String::from_config_value(&ConfigValue::Integer(8080), "port").unwrap(),
            "8080"
        );
        assert_eq!(
            String::from_config_value(&ConfigValue::Bool(true), "flag").unwrap(),
            "true"
        );
    }

    #[test]
    fn string_rejects_null() {
        let err = String::from_config_value(&ConfigValue::Null, "apiUrl").unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref key, .. } if key == "apiUrl"));
    }

    #[test]
    fn yaml_tagged_value_is_unwrapped() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("!secret hunter2").unwrap();
        assert_eq!(ConfigValue::from(&yaml), ConfigValue::String("hunter2".into()));
    }
}
