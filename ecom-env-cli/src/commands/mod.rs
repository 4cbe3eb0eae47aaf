//! Command implementations for the `ecom-env` CLI.

/// `ecom-env check`: load every layer and report what is missing or invalid.
pub mod check;

/// `ecom-env keys`: list the record's properties.
pub mod keys;

/// `ecom-env render`: JSON or TypeScript output for the frontend build.
pub mod render;

/// `ecom-env show`: print the resolved record.
pub mod show;
