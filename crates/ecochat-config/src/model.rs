// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the ecochat client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use ecochat_core::{Granularity, Provider};
use serde::{Deserialize, Serialize};

/// Top-level ecochat configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EcochatConfig {
    /// Gateway endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Chat session defaults.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Analytics dashboard defaults.
    #[serde(default)]
    pub insights: InsightsConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gateway endpoint configuration.
///
/// Read once when a client is built. Changing it requires a new client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Endpoint base, e.g. `http://localhost:8010`. A trailing `/` is ignored.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Identifier sent as `user_id` in chat requests.
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Per-request timeout applied by the HTTP transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: default_user_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// The endpoint base with any trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

fn default_base_url() -> String {
    "http://localhost:8010".to_string()
}

fn default_user_id() -> String {
    "webclient".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Chat session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Provider whose catalog the session offers.
    #[serde(default = "default_provider")]
    pub provider: Provider,

    /// Model to preselect. Defaults to the provider's first enabled entry.
    #[serde(default)]
    pub model: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
        }
    }
}

fn default_provider() -> Provider {
    Provider::OpenAi
}

/// Dashboard configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InsightsConfig {
    /// Initial timeline granularity.
    #[serde(default)]
    pub granularity: Granularity,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
