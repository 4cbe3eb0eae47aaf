use std::fmt;

use super::typed::ConfigProperties;
use super::{ConfigError, ConfigValue, EnvConfig};

/// What is wrong with a config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Missing,
    TypeMismatch,
    Invalid,
}

/// A single problem found while checking a section.
#[derive(Debug, Clone)]
pub struct MissingKeyError {
    /// Section prefix (`"kinde"`, or `"environment"` for the root).
    pub source: String,
    pub key: String,
    pub expected_type: String,
    /// Environment variable that would fix the problem.
    pub env_hint: String,
    pub description: Option<String>,
    pub kind: IssueKind,
}

impl fmt::Display for MissingKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            IssueKind::Missing => "missing",
            IssueKind::TypeMismatch => "wrong type",
            IssueKind::Invalid => "invalid",
        };
        write!(
            f,
            "  - `{}`: key '{}' ({}) is {what}, set env var `{}`",
            self.source, self.key, self.expected_type, self.env_hint
        )?;
        if let Some(desc) = &self.description {
            write!(f, " -- {desc}")?;
        }
        Ok(())
    }
}

fn env_hint_for(key: &str) -> String {
    key.to_uppercase().replace('.', "_")
}

/// Check a [`ConfigProperties`] section against `config`.
///
/// Missing required keys and constraint failures on the keys that are present
/// are reported together. An empty result means the section loads cleanly.
///
/// Bound environment variables only count once they are in the key map, see
/// [`EnvConfig::bind_env`](super::EnvConfig::bind_env).
pub fn validate_section<C: ConfigProperties>(config: &EnvConfig) -> Vec<MissingKeyError> {
    let source = match C::prefix() {
        "" => "environment",
        prefix => prefix,
    }
    .to_string();
    let meta = C::properties_metadata();

    let missing: Vec<&'static str> = meta
        .iter()
        .filter(|prop| prop.required && !config.contains_key(prop.full_key))
        .map(|prop| prop.full_key)
        .collect();

    let mut errors: Vec<MissingKeyError> = meta
        .iter()
        .filter(|prop| missing.contains(&prop.full_key))
        .map(|prop| MissingKeyError {
            source: source.clone(),
            key: prop.full_key.to_string(),
            expected_type: prop.type_name.to_string(),
            env_hint: prop.env_hint(),
            description: prop.description.map(str::to_string),
            kind: IssueKind::Missing,
        })
        .collect();

    // Empty stand-ins let the section build far enough to check the present keys.
    let mut standin = config.clone();
    for key in &missing {
        standin.set(key, ConfigValue::String(String::new()));
    }

    let hint = |key: &str| {
        meta.iter()
            .find(|prop| prop.full_key == key)
            .map(|prop| prop.env_hint())
            .unwrap_or_else(|| env_hint_for(key))
    };

    match C::from_config(&standin) {
        Ok(_) => {}
        Err(ConfigError::TypeMismatch { key, expected }) => errors.push(MissingKeyError {
            source,
            env_hint: hint(&key),
            key,
            expected_type: expected.to_string(),
            description: Some(format!("expected {expected}")),
            kind: IssueKind::TypeMismatch,
        }),
        Err(ConfigError::Validation(details)) => {
            errors.extend(
                details
                    .into_iter()
                    .filter(|detail| !missing.iter().any(|key| *key == detail.key))
                    .map(|detail| MissingKeyError {
                        source: source.clone(),
                        env_hint: hint(&detail.key),
                        key: detail.key,
                        expected_type: "valid value".to_string(),
                        description: Some(detail.message),
                        kind: IssueKind::Invalid,
                    }),
            )
        }
        Err(ConfigError::NotFound(key)) => errors.push(MissingKeyError {
            source,
            env_hint: hint(&key),
            key,
            expected_type: "unknown".to_string(),
            description: None,
            kind: IssueKind::Missing,
        }),
        Err(other) => errors.push(MissingKeyError {
            source,
            key: String::new(),
            expected_type: "unknown".to_string(),
            env_hint: String::new(),
            description: Some(other.to_string()),
            kind: IssueKind::Invalid,
        }),
    }

    errors
}
