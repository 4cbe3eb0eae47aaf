use std::collections::HashMap;
use std::path::Path;

use super::value::{yaml_key, ConfigValue};
use super::ConfigError;

pub(crate) type ValueMap = HashMap<String, ConfigValue>;

/// Merge a YAML file into `values`. A missing file is not an error.
///
/// Returns whether the file existed.
pub(crate) fn load_yaml_file(path: &Path, values: &mut ValueMap) -> Result<bool, ConfigError> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "config file not present, skipping");
        return Ok(false);
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
    load_yaml_str(&content, values)
        .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(true)
}

/// Parse a YAML document and merge its flattened keys into `values`.
pub(crate) fn load_yaml_str(content: &str, values: &mut ValueMap) -> Result<(), ConfigError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    flatten_yaml("", &yaml, values);
    Ok(())
}

/// Load `.env` and `.env.{profile}` from `dir` into the process environment.
///
/// Variables that are already set keep their value, so the real environment
/// always wins over dotenv files.
pub(crate) fn load_dotenv_files(dir: &Path, profile: &str) {
    for name in [".env".to_string(), format!(".env.{profile}")] {
        let path = dir.join(&name);
        if !path.is_file() {
            continue;
        }
        match dotenvy::from_path(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable dotenv file"),
        }
    }
}

/// Flatten a YAML tree into dot-separated keys (`kinde.clientId`).
///
/// Sequences are stored whole under their parent key and also element by
/// element under `key.0`, `key.1`, ...
pub(crate) fn flatten_yaml(prefix: &str, value: &serde_yaml::Value, out: &mut ValueMap) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let segment = yaml_key(k);
                let key = if prefix.is_empty() {
                    segment
                } else {
                    format!("{prefix}.{segment}")
                };
                flatten_yaml(&key, v, out);
            }
        }
        serde_yaml::Value::Sequence(seq) if !prefix.is_empty() => {
            out.insert(prefix.to_string(), ConfigValue::from(value));
            for (i, item) in seq.iter().enumerate() {
                flatten_yaml(&format!("{prefix}.{i}"), item, out);
            }
        }
        leaf if !prefix.is_empty() => {
            out.insert(prefix.to_string(), ConfigValue::from(leaf));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_mapping_is_flattened() {
        let mut values = ValueMap::new();
        load_yaml_str(
            "kinde:\n  clientId: abc\n  authority: https://id.example.com\napiUrl: http://api\n",
            &mut values,
        )
        .unwrap();
        assert_eq!(values.get("kinde.clientId"), Some(&ConfigValue::from("abc")));
        assert_eq!(values.get("apiUrl"), Some(&ConfigValue::from("http://api")));
        assert!(!values.contains_key("kinde"));
    }

    #[test]
    fn later_documents_override_earlier_keys() {
        let mut values = ValueMap::new();
        load_yaml_str("apiUrl: http://one\n", &mut values).unwrap();
        load_yaml_str("apiUrl: http://two\n", &mut values).unwrap();
        assert_eq!(values.get("apiUrl"), Some(&ConfigValue::from("http://two")));
    }

    #[test]
    fn missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut values = ValueMap::new();
        let found = load_yaml_file(&dir.path().join("application.yaml"), &mut values).unwrap();
        assert!(!found);
        assert!(values.is_empty());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("application.yaml");
        std::fs::write(&path, "kinde: [unclosed").unwrap();
        let err = load_yaml_file(&path, &mut ValueMap::new()).unwrap_err();
        assert!(err.to_string().contains("application.yaml"));
    }
}
