//! # ecom-env
//!
//! Per-environment configuration record for the shop frontend: the
//! identity-provider (Kinde) settings and the backend API base URL.
//!
//! ```ignore
//! use ecom_env::prelude::*;
//!
//! ecom_env::init_tracing();
//! let env = ecom_env::load("prod")?;
//! ecom_env::install(env)?;
//!
//! let api = ecom_env::current().api_url();
//! ```
//!
//! Values are layered from built-in development defaults, `application*.yaml`
//! files, `.env` files and environment variables (see [`EnvConfig`]).

pub mod config;
pub mod environment;
pub mod logging;
pub mod profile;
pub mod render;

pub use config::{ConfigError, ConfigValue, EnvConfig};
pub use environment::{current, install, load, load_from_dir, Environment, KindeConfig};
pub use logging::init_tracing;
pub use profile::Profile;
pub use render::Format;

pub mod prelude {
    //! Re-exports for the common case.
    pub use crate::config::{ConfigError, ConfigProperties, EnvConfig};
    pub use crate::environment::{Environment, KindeConfig};
    pub use crate::profile::Profile;
}
