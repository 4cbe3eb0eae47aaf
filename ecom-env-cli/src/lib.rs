//! # ecom-env-cli
//!
//! The `ecom-env` binary:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ecom-env show` | Print the resolved environment as JSON |
//! | `ecom-env check` | Report missing or invalid keys with env var hints |
//! | `ecom-env render` | Write JSON or an `environment.ts` module |
//! | `ecom-env keys` | List configuration keys and their env vars |

pub mod commands;
