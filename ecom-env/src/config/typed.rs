use super::{ConfigError, EnvConfig};

/// Metadata about a single configuration property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMeta {
    /// Key relative to the section (e.g. `"clientId"`).
    pub key: &'static str,
    /// Absolute key (e.g. `"kinde.clientId"`).
    pub full_key: &'static str,
    /// Rust type name.
    pub type_name: &'static str,
    /// Whether the property has no default.
    pub required: bool,
    /// Environment variable bound to this property.
    pub env_var: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl PropertyMeta {
    /// Env var to suggest when the key is missing: the bound variable, or the
    /// key upper-cased with dots turned into underscores.
    pub fn env_hint(&self) -> String {
        match self.env_var {
            Some(var) => var.to_string(),
            None => self.full_key.to_uppercase().replace('.', "_"),
        }
    }
}

/// A strongly-typed section built from an [`EnvConfig`].
pub trait ConfigProperties: Sized {
    /// Key prefix of the section (`""` for the root).
    fn prefix() -> &'static str;

    /// All properties the section reads.
    fn properties_metadata() -> Vec<PropertyMeta>;

    /// Build the section, failing on missing, mistyped or invalid values.
    fn from_config(config: &EnvConfig) -> Result<Self, ConfigError>;
}

/// Copy bound environment variables into the key map.
///
/// Runs before [`ConfigProperties::from_config`] so a variable such as
/// `KINDE_CLIENT_ID` overrides `kinde.clientId` from any YAML layer.
pub(crate) fn apply_env_bindings<C: ConfigProperties>(config: &mut EnvConfig) {
    for prop in C::properties_metadata() {
        let Some(var) = prop.env_var else { continue };
        if let Ok(value) = std::env::var(var) {
            tracing::debug!(key = prop.full_key, env = var, "config key overridden by environment");
            config.set(prop.full_key, value.into());
        }
    }
}
