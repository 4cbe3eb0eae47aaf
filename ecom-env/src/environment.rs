//! The environment record read by the shop frontend.
//!
//! Field names and nesting match what the frontend's identity-provider
//! integration and API client read by name:
//!
//! ```text
//! { kinde: { authority, redirectUrl, postLogoutRedirectUri, clientId, audience }, apiUrl }
//! ```
//!
//! Records are immutable once built: fields are private and there are no
//! setters. The process-wide record is published once through [`install`]
//! and read through [`current`].

use std::path::Path;
use std::sync::OnceLock;

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::config::{
    ConfigError, ConfigProperties, ConfigValidationDetail, EnvConfig, PropertyMeta,
};

/// YAML for the `dev` and `test` base layer.
pub(crate) const DEVELOPMENT_YAML: &str = include_str!("../defaults/application-dev.yaml");

/// Identity-provider settings, grouped under `kinde`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KindeConfig {
    #[garde(length(min = 1), url)]
    authority: String,
    #[garde(length(min = 1), url)]
    redirect_url: String,
    #[garde(length(min = 1), url)]
    post_logout_redirect_uri: String,
    #[garde(length(min = 1))]
    client_id: String,
    #[garde(length(min = 1), url)]
    audience: String,
}

impl KindeConfig {
    /// Build and validate an identity-provider section.
    pub fn new(
        authority: impl Into<String>,
        redirect_url: impl Into<String>,
        post_logout_redirect_uri: impl Into<String>,
        client_id: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let kinde = Self {
            authority: authority.into(),
            redirect_url: redirect_url.into(),
            post_logout_redirect_uri: post_logout_redirect_uri.into(),
            client_id: client_id.into(),
            audience: audience.into(),
        };
        kinde.validate().map_err(|report| report_to_error("kinde", &report))?;
        Ok(kinde)
    }

    /// Identity-provider base endpoint.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Where the provider sends the user after sign-in.
    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    /// Where the provider sends the user after sign-out.
    pub fn post_logout_redirect_uri(&self) -> &str {
        &self.post_logout_redirect_uri
    }

    /// Public client identifier registered with the provider.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Intended API audience for issued tokens.
    pub fn audience(&self) -> &str {
        &self.audience
    }
}

/// The environment configuration record.
///
/// Fields cannot be reassigned after construction:
///
/// ```compile_fail
/// let mut env = ecom_env::Environment::development();
/// env.api_url = "https://elsewhere.example".to_string();
/// ```
///
/// ```compile_fail
/// let mut env = ecom_env::Environment::development();
/// env.kinde.client_id = String::new();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Environment {
    #[garde(dive)]
    kinde: KindeConfig,
    #[garde(length(min = 1), url)]
    api_url: String,
}

impl Environment {
    /// Build and validate a record.
    pub fn new(kinde: KindeConfig, api_url: impl Into<String>) -> Result<Self, ConfigError> {
        let env = Self {
            kinde,
            api_url: api_url.into(),
        };
        env.validate_record()?;
        Ok(env)
    }

    /// The built-in development record.
    pub fn development() -> Self {
        Self {
            kinde: KindeConfig {
                authority: "https://shopecom.kinde.com".into(),
                redirect_url: "http://localhost:4200".into(),
                post_logout_redirect_uri: "http://localhost:4200".into(),
                client_id: "79d811f5d44847c8a05abd1317ee54c7".into(),
                audience: "http://localhost:8080/api".into(),
            },
            api_url: "http://localhost:8080/api".into(),
        }
    }

    pub fn kinde(&self) -> &KindeConfig {
        &self.kinde
    }

    /// Base endpoint of the backend API.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Run the field constraints: every value non-empty, every value but
    /// `kinde.clientId` a well-formed URL.
    pub fn validate_record(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|report| report_to_error("", &report))
    }

    /// Config keys whose value uses plain `http`.
    pub fn insecure_urls(&self) -> Vec<(&'static str, &str)> {
        [
            ("kinde.authority", self.kinde.authority.as_str()),
            ("kinde.redirectUrl", self.kinde.redirect_url.as_str()),
            ("kinde.postLogoutRedirectUri", self.kinde.post_logout_redirect_uri.as_str()),
            ("kinde.audience", self.kinde.audience.as_str()),
            ("apiUrl", self.api_url.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| url.starts_with("http://"))
        .collect()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::development()
    }
}

/// `post_logout_redirect_uri` -> `postLogoutRedirectUri`, so reported keys match config keys.
fn camel_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut upper = false;
    for c in segment.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn report_to_error(prefix: &str, report: &garde::Report) -> ConfigError {
    let details = report
        .iter()
        .map(|(path, error)| {
            let path = path
                .to_string()
                .split('.')
                .map(camel_case)
                .collect::<Vec<_>>()
                .join(".");
            let key = match (prefix.is_empty(), path.is_empty()) {
                (true, _) => path,
                (false, true) => prefix.to_string(),
                (false, false) => format!("{prefix}.{path}"),
            };
            ConfigValidationDetail {
                key,
                message: error.message().to_string(),
            }
        })
        .collect();
    ConfigError::Validation(details)
}

const PROPERTIES: [(&str, &str, &str, &str); 6] = [
    (
        "kinde.authority",
        "authority",
        "KINDE_AUTHORITY",
        "Identity-provider base endpoint",
    ),
    (
        "kinde.redirectUrl",
        "redirectUrl",
        "KINDE_REDIRECT_URL",
        "Post-authentication redirect target",
    ),
    (
        "kinde.postLogoutRedirectUri",
        "postLogoutRedirectUri",
        "KINDE_POST_LOGOUT_REDIRECT_URI",
        "Post-logout redirect target",
    ),
    (
        "kinde.clientId",
        "clientId",
        "KINDE_CLIENT_ID",
        "Public client identifier registered with the identity provider",
    ),
    (
        "kinde.audience",
        "audience",
        "KINDE_AUDIENCE",
        "Intended API audience for issued tokens",
    ),
    (
        "apiUrl",
        "apiUrl",
        "API_URL",
        "Base endpoint of the backend API",
    ),
];

impl ConfigProperties for Environment {
    fn prefix() -> &'static str {
        ""
    }

    fn properties_metadata() -> Vec<PropertyMeta> {
        PROPERTIES
            .iter()
            .map(|&(full_key, key, env_var, description)| PropertyMeta {
                key,
                full_key,
                type_name: "String",
                required: true,
                env_var: Some(env_var),
                description: Some(description),
            })
            .collect()
    }

    fn from_config(config: &EnvConfig) -> Result<Self, ConfigError> {
        let [authority, redirect_url, post_logout_redirect_uri, client_id, audience, api_url] =
            PROPERTIES.map(|(full_key, _, _, _)| config.get::<String>(full_key));

        let env = Environment {
            kinde: KindeConfig {
                authority: authority?,
                redirect_url: redirect_url?,
                post_logout_redirect_uri: post_logout_redirect_uri?,
                client_id: client_id?,
                audience: audience?,
            },
            api_url: api_url?,
        };
        env.validate_record()?;
        Ok(env)
    }
}

/// Load and validate the record for `profile` from the current directory.
pub fn load(profile: &str) -> Result<Environment, ConfigError> {
    load_from_dir(Path::new("."), profile)
}

/// Load and validate the record for `profile` from `dir`.
pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Environment, ConfigError> {
    let config = EnvConfig::load_from_dir(dir, profile)?.with_typed::<Environment>()?;
    let builtin = config
        .profile()
        .parse::<crate::Profile>()
        .map(|p| p.has_builtin_defaults())
        .unwrap_or(false);
    if !builtin {
        for (key, url) in config.insecure_urls() {
            tracing::warn!(profile = config.profile(), key, url, "plain http URL outside development");
        }
    }
    tracing::info!(
        profile = config.profile(),
        authority = config.kinde().authority(),
        api_url = config.api_url(),
        "environment configuration loaded"
    );
    Ok(config.into_typed())
}

static CURRENT: OnceLock<Environment> = OnceLock::new();

/// Publish `env` as the process-wide record.
///
/// Only the first call takes effect. Later calls return
/// [`ConfigError::AlreadyInitialized`] and leave the published record as is.
pub fn install(env: Environment) -> Result<&'static Environment, ConfigError> {
    env.validate_record()?;
    let mut published = false;
    let current = CURRENT.get_or_init(|| {
        published = true;
        env
    });
    if published {
        tracing::debug!(authority = current.kinde().authority(), "environment published");
        Ok(current)
    } else {
        Err(ConfigError::AlreadyInitialized)
    }
}

/// The process-wide record, publishing [`Environment::development`] on first
/// access if nothing was installed.
pub fn current() -> &'static Environment {
    CURRENT.get_or_init(Environment::development)
}
