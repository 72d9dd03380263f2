// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the ecochat gateway client.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use ecochat_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Gateway: {}", config.api.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::EcochatConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `EcochatConfig` or every diagnostic found.
pub fn load_and_validate() -> Result<EcochatConfig, Vec<ConfigError>> {
    finish(loader::load_config())
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<EcochatConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path))
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<EcochatConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

#[allow(clippy::result_large_err)]
fn finish(
    loaded: Result<EcochatConfig, figment::Error>,
) -> Result<EcochatConfig, Vec<ConfigError>> {
    let config = loaded.map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    Ok(config)
}
