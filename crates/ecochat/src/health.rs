// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ecochat health` command implementation.

use colored::Colorize;
use ecochat_client::HttpGateway;
use ecochat_config::EcochatConfig;
use ecochat_core::{ChatGateway, EcochatError, HealthStatus};

/// Probes the gateway's health endpoint and prints the result.
///
/// An unreachable gateway is reported as an error so the exit status is
/// non-zero.
pub async fn run_health(config: &EcochatConfig) -> Result<(), EcochatError> {
    let gateway = HttpGateway::from_config(&config.api)?;
    let base = config.api.normalized_base_url();

    match gateway.health().await? {
        HealthStatus::Healthy { models_supported } => {
            let models = models_supported
                .map(|n| format!(", {n} models"))
                .unwrap_or_default();
            println!("{} {base} is up{models}", "✓".green());
        }
        HealthStatus::Degraded(status) => {
            println!("{} {base} reports `{status}`", "!".yellow());
        }
    }
    Ok(())
}
