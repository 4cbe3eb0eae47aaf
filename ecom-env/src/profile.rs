use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Deployment profile selecting which configuration layers apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    #[default]
    Dev,
    Test,
    Prod,
    /// Any other name, e.g. `staging`. Loads `application-staging.yaml`.
    Custom(String),
}

impl Profile {
    pub fn as_str(&self) -> &str {
        match self {
            Profile::Dev => "dev",
            Profile::Test => "test",
            Profile::Prod => "prod",
            Profile::Custom(name) => name,
        }
    }

    /// Whether the built-in development values form the base layer.
    ///
    /// Every other profile has to supply all six values itself.
    pub fn has_builtin_defaults(&self) -> bool {
        matches!(self, Profile::Dev | Profile::Test)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    /// Profile names end up in file names, so only `[A-Za-z0-9_-]` is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Load(format!("invalid profile name '{s}'")));
        }
        Ok(match name.as_str() {
            "dev" | "development" | "local" => Profile::Dev,
            "test" => Profile::Test,
            "prod" | "production" => Profile::Prod,
            _ => Profile::Custom(name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_canonical_names() {
        assert_eq!("development".parse::<Profile>().unwrap(), Profile::Dev);
        assert_eq!("Production".parse::<Profile>().unwrap(), Profile::Prod);
        assert_eq!(Profile::Prod.to_string(), "prod");
    }

    #[test]
    fn custom_profile_keeps_its_name() {
        let profile: Profile = "staging".parse().unwrap();
        assert_eq!(profile, Profile::Custom("staging".into()));
        assert!(!profile.has_builtin_defaults());
    }

    #[test]
    fn path_like_names_are_rejected() {
        assert!("../prod".parse::<Profile>().is_err());
        assert!("".parse::<Profile>().is_err());
    }
}
