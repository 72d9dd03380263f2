// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ecochat insights` command implementation.
//!
//! Loads the dashboard once and prints it, or prints the raw snapshot as
//! JSON for scripting. Colors are disabled with `--plain` or when stdout is
//! not a TTY.

use std::io::IsTerminal;
use std::sync::Arc;

use colored::Colorize;
use ecochat_client::HttpGateway;
use ecochat_config::EcochatConfig;
use ecochat_core::{EcochatError, Granularity};
use ecochat_insights::{AnalyticsAggregator, Dashboard, DashboardState};

use crate::render;

/// Runs the `ecochat insights` command.
pub async fn run_insights(
    config: &EcochatConfig,
    granularity: Granularity,
    json: bool,
    plain: bool,
) -> Result<(), EcochatError> {
    let source = Arc::new(HttpGateway::from_config(&config.api)?);
    let mut dashboard = Dashboard::new(AnalyticsAggregator::new(source), granularity);

    let use_color = !json && !plain && std::io::stdout().is_terminal();
    colored::control::set_override(use_color);

    if !json {
        eprintln!("{}", format!("loading insights ({granularity})...").dimmed());
    }

    dashboard.refresh().await;
    match dashboard.into_state() {
        DashboardState::Ready(snapshot) => {
            if json {
                let text = serde_json::to_string_pretty(&snapshot).map_err(|e| {
                    EcochatError::Internal(format!("failed to serialize snapshot: {e}"))
                })?;
                println!("{text}");
            } else {
                print!("{}", render::render_dashboard(&snapshot, use_color));
            }
            Ok(())
        }
        DashboardState::Failed(err) => Err(err.into()),
        other => Err(EcochatError::Internal(format!(
            "dashboard ended in unexpected state: {other}"
        ))),
    }
}
