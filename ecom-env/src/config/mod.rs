mod loader;
pub mod secrets;
pub mod typed;
pub mod validation;
pub mod value;

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::path::Path;

use crate::profile::Profile;

pub use secrets::{DefaultSecretResolver, SecretResolver};
pub use typed::{ConfigProperties, PropertyMeta};
pub use validation::{validate_section, IssueKind, MissingKeyError};
pub use value::{ConfigValue, FromConfigValue};

/// Environment variable selecting the active profile.
pub const PROFILE_ENV: &str = "ECOM_PROFILE";

/// A single failed constraint from typed validation (garde).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationDetail {
    pub key: String,
    pub message: String,
}

/// Error type for loading and publishing the environment configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O, YAML or placeholder error while loading.
    Load(String),
    /// Constraint violations on the typed record.
    Validation(Vec<ConfigValidationDetail>),
    /// The process-wide environment was already published.
    AlreadyInitialized,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Validation(details) => {
                write!(f, "Config validation errors:")?;
                for detail in details {
                    write!(f, "\n  - {}: {}", detail.key, detail.message)?;
                }
                Ok(())
            }
            ConfigError::AlreadyInitialized => {
                write!(f, "Environment configuration is already initialized")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Layered key/value configuration with an optional typed layer.
///
/// `EnvConfig` (= `EnvConfig<()>`) gives raw access by dot-separated key.
/// `EnvConfig<T>` adds a validated record reachable through `Deref<Target = T>`.
///
/// Resolution order (lowest to highest priority):
/// 1. built-in development values (profiles `dev` and `test` only)
/// 2. `application.yaml`
/// 3. `application-{profile}.yaml`
/// 4. `.env`, then `.env.{profile}` (loaded into the process environment)
/// 5. `${...}` placeholders in string values
/// 6. environment variables bound to typed properties (applied by [`EnvConfig::with_typed`])
///
/// The profile is `ECOM_PROFILE` if set, else the argument.
#[derive(Debug, Clone)]
pub struct EnvConfig<T = ()> {
    values: HashMap<String, ConfigValue>,
    profile: String,
    typed: T,
}

impl EnvConfig {
    /// Load from the current directory with the default secret resolver.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile)
    }

    /// Load from `dir` with the default secret resolver.
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        Self::load_with_resolver(dir, profile, &DefaultSecretResolver)
    }

    /// Load every layer found in `dir`, resolving placeholders with `resolver`.
    pub fn load_with_resolver(
        dir: &Path,
        profile: &str,
        resolver: &dyn SecretResolver,
    ) -> Result<Self, ConfigError> {
        let active: Profile = std::env::var(PROFILE_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| profile.to_string())
            .parse()?;
        let mut values = HashMap::new();

        if active.has_builtin_defaults() {
            loader::load_yaml_str(crate::environment::DEVELOPMENT_YAML, &mut values)?;
        }
        let active = active.to_string();

        loader::load_yaml_file(&dir.join("application.yaml"), &mut values)?;
        loader::load_yaml_file(&dir.join(format!("application-{active}.yaml")), &mut values)?;
        loader::load_dotenv_files(dir, &active);

        resolve_string_values(&mut values, resolver)?;

        tracing::debug!(profile = %active, keys = values.len(), "configuration layers loaded");
        Ok(EnvConfig {
            values,
            profile: active,
            typed: (),
        })
    }

    /// Build a config from a YAML string. No other layer is applied.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(EnvConfig {
            values,
            profile: profile.to_string(),
            typed: (),
        })
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Copy the environment variables bound to `C`'s properties into the key map.
    pub fn bind_env<C: ConfigProperties>(&mut self) {
        typed::apply_env_bindings::<C>(self);
    }

    /// Apply bound environment variables, then build and validate `C`.
    ///
    /// ```ignore
    /// let config = EnvConfig::load("dev")?.with_typed::<Environment>()?;
    /// config.kinde().client_id();          // typed, via Deref
    /// config.get::<String>("apiUrl")?;     // raw access still works
    /// ```
    pub fn with_typed<C: ConfigProperties>(mut self) -> Result<EnvConfig<C>, ConfigError> {
        self.bind_env::<C>();
        let typed = C::from_config(&self)?;
        Ok(EnvConfig {
            values: self.values,
            profile: self.profile,
            typed,
        })
    }
}

impl<T> EnvConfig<T> {
    /// Read `key` as `V`.
    ///
    /// # Errors
    ///
    /// `ConfigError::NotFound` if the key is absent, `ConfigError::TypeMismatch`
    /// if it cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Consume the config and keep only the typed layer.
    pub fn into_typed(self) -> T {
        self.typed
    }

    /// Copy of the raw key map without the typed layer.
    pub fn raw(&self) -> EnvConfig {
        EnvConfig {
            values: self.values.clone(),
            profile: self.profile.clone(),
            typed: (),
        }
    }
}

impl<T> Deref for EnvConfig<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.typed
    }
}

fn resolve_string_values(
    values: &mut HashMap<String, ConfigValue>,
    resolver: &dyn SecretResolver,
) -> Result<(), ConfigError> {
    for value in values.values_mut() {
        if let ConfigValue::String(s) = value {
            if s.contains("${") {
                *s = secrets::resolve_placeholders(s, resolver)?;
            }
        }
    }
    Ok(())
}
