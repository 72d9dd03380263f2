// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./ecochat.toml` > `~/.config/ecochat/ecochat.toml` > `/etc/ecochat/ecochat.toml`
//! with environment variable overrides via `ECOCHAT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::EcochatConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/ecochat/ecochat.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "ecochat.toml";

/// Path of the per-user XDG config file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ecochat/ecochat.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/ecochat/ecochat.toml` (system-wide)
/// 3. `~/.config/ecochat/ecochat.toml` (user XDG config)
/// 4. `./ecochat.toml` (local directory)
/// 5. `ECOCHAT_*` environment variables
pub fn load_config() -> Result<EcochatConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<EcochatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EcochatConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<EcochatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EcochatConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(EcochatConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `ECOCHAT_API_BASE_URL` must map to `api.base_url`, not
/// `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("ECOCHAT_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("api_", "api.", 1)
            .replacen("chat_", "chat.", 1)
            .replacen("insights_", "insights.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecochat_core::Provider;

    #[test]
    fn env_overrides_base_url() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ECOCHAT_API_BASE_URL", "http://10.0.0.5:9000");
            jail.set_env("ECOCHAT_CHAT_PROVIDER", "mistral");
            let config = load_config()?;
            assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
            assert_eq!(config.chat.provider, Provider::Mistral);
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_PATH,
                r#"
                [api]
                user_id = "tester"
                timeout_secs = 15
                "#,
            )?;
            let config = load_config()?;
            assert_eq!(config.api.user_id, "tester");
            assert_eq!(config.api.timeout_secs, 15);
            assert_eq!(config.api.base_url, "http://localhost:8010");
            Ok(())
        });
    }

    #[test]
    fn env_beats_local_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(LOCAL_CONFIG_PATH, "[logging]\nlevel = \"warn\"\n")?;
            jail.set_env("ECOCHAT_LOGGING_LEVEL", "debug");
            let config = load_config()?;
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn explicit_path_is_loaded() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[chat]\nmodel = \"openai:gpt-4o\"\n")?;
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.chat.model.as_deref(), Some("openai:gpt-4o"));
            Ok(())
        });
    }
}
