// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ecochat - Terminal client for a carbon-aware LLM gateway.
//!
//! This is the binary entry point: argument parsing, configuration loading,
//! tracing setup, and subcommand dispatch.

mod attach;
mod chat;
mod health;
mod insights;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use ecochat_config::EcochatConfig;
use ecochat_core::{EcochatError, Granularity, Provider};
use tracing_subscriber::EnvFilter;

/// ecochat - Chat with LLMs through a carbon-aware gateway.
#[derive(Parser, Debug)]
#[command(name = "ecochat", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Provider to chat with (openai, mistral, openrouter, mock).
        #[arg(long)]
        provider: Option<Provider>,
        /// Model identifier, e.g. `openai:gpt-4o`.
        #[arg(long)]
        model: Option<String>,
        /// Attach a file to the first message. Repeatable.
        #[arg(long = "attach", value_name = "FILE")]
        attach: Vec<PathBuf>,
    },
    /// Show the usage and carbon dashboard.
    Insights {
        /// Timeline bucket size (hour, day, week, month).
        #[arg(long)]
        granularity: Option<Granularity>,
        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// List the model catalog.
    Models {
        /// Only list this provider's models.
        #[arg(long)]
        provider: Option<Provider>,
    },
    /// Check whether the gateway is reachable.
    Health,
}

fn load_config(path: Option<&PathBuf>) -> EcochatConfig {
    let loaded = match path {
        Some(path) => ecochat_config::load_and_validate_path(path),
        None => ecochat_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            ecochat_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr so it
/// does not interleave with chat replies.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ecochat={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

async fn run(cli: Cli, config: EcochatConfig) -> Result<(), EcochatError> {
    match cli.command {
        Some(Commands::Chat {
            provider,
            model,
            attach,
        }) => {
            let options = chat::ChatOptions {
                provider: provider.unwrap_or(config.chat.provider),
                model: model.or_else(|| match provider {
                    Some(p) if p != config.chat.provider => None,
                    _ => config.chat.model.clone(),
                }),
                attachments: attach,
            };
            chat::run_chat(&config, options).await
        }
        Some(Commands::Insights {
            granularity,
            json,
            plain,
        }) => {
            let granularity = granularity.unwrap_or(config.insights.granularity);
            insights::run_insights(&config, granularity, json, plain).await
        }
        Some(Commands::Models { provider }) => {
            let current = config.chat.model.as_deref();
            print!("{}", render::render_catalog(provider, current));
            Ok(())
        }
        Some(Commands::Health) => health::run_health(&config).await,
        None => {
            println!("ecochat: use --help for available commands");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config.logging.level);

    if let Err(e) = run(cli, config).await {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
