// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express:
//! endpoint URL shape, timeout bounds, catalog membership of the model.

use crate::diagnostic::ConfigError;
use crate::model::EcochatConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure rather than stopping at the first.
pub fn validate_config(config: &EcochatConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.normalized_base_url();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.api.user_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.user_id must not be empty".to_string(),
        });
    }

    let provider = config.chat.provider;
    if let Some(model) = config
        .chat
        .model
        .as_deref()
        .filter(|m| provider.find(m).is_none())
    {
        let known = provider
            .models()
            .iter()
            .filter(|m| m.enabled)
            .map(|m| m.id)
            .collect::<Vec<_>>()
            .join(", ");
        errors.push(ConfigError::Validation {
            message: format!(
                "chat.model `{model}` is not an available {provider} model (available: {known})"
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` must be one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
