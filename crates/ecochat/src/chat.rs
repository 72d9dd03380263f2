// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ecochat chat` command implementation.
//!
//! Launches an interactive REPL with colored prompt and readline history.
//! Each invocation starts a fresh conversation; nothing is persisted.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use ecochat_client::HttpGateway;
use ecochat_config::EcochatConfig;
use ecochat_core::{EcochatError, FileRef, Provider, UsageRecord};
use ecochat_session::{ConversationSession, SendOutcome};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::attach::load_attachment;
use crate::render;

/// Settings resolved from flags and configuration.
#[derive(Debug)]
pub struct ChatOptions {
    pub provider: Provider,
    pub model: Option<String>,
    pub attachments: Vec<PathBuf>,
}

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Quit,
    Clear,
    Help,
    Models,
    Model(String),
    Attach(PathBuf),
    Unknown(String),
    Message(String),
}

fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return ReplCommand::Message(trimmed.to_string());
    }
    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (trimmed, ""),
    };
    match (command, arg) {
        ("/quit" | "/exit", _) => ReplCommand::Quit,
        ("/clear", _) => ReplCommand::Clear,
        ("/help", _) => ReplCommand::Help,
        ("/models", _) => ReplCommand::Models,
        ("/model", id) if !id.is_empty() => ReplCommand::Model(id.to_string()),
        ("/attach", path) if !path.is_empty() => ReplCommand::Attach(PathBuf::from(path)),
        _ => ReplCommand::Unknown(trimmed.to_string()),
    }
}

/// Accepts `gpt-4o` as shorthand for `openai:gpt-4o` within the session's provider.
fn qualify_model(provider: Provider, id: &str) -> String {
    if id.contains(':') {
        id.to_string()
    } else {
        format!("{provider}:{id}")
    }
}

/// Running totals over every successful reply in this REPL.
#[derive(Debug, Default)]
struct Totals {
    replies: u32,
    tokens: u64,
    cost_eur: f64,
    est_co2e_g: f64,
}

impl Totals {
    fn add(&mut self, usage: &UsageRecord) {
        self.replies += 1;
        self.tokens += usage.total_tokens();
        self.cost_eur += usage.cost_eur;
        self.est_co2e_g += usage.est_co2e_g;
    }
}

fn print_help() {
    println!("  {}            leave the chat", "/quit".yellow());
    println!("  {}           start a new conversation", "/clear".yellow());
    println!("  {}          list models for this provider", "/models".yellow());
    println!("  {}        switch model", "/model ID".yellow());
    println!("  {}     attach a file to the next message", "/attach PATH".yellow());
}

/// Runs the `ecochat chat` interactive REPL.
pub async fn run_chat(config: &EcochatConfig, options: ChatOptions) -> Result<(), EcochatError> {
    let gateway = Arc::new(HttpGateway::from_config(&config.api)?);
    let mut session = ConversationSession::new(options.provider, gateway);

    if let Some(model) = options.model.as_deref() {
        if !session.select_model(&qualify_model(options.provider, model)) {
            eprintln!(
                "{}: `{model}` is not an available {} model, using {}",
                "warning".yellow(),
                options.provider,
                session.model().unwrap_or("none")
            );
        }
    }

    let mut pending: Vec<FileRef> = Vec::new();
    for path in &options.attachments {
        pending.push(load_attachment(path).await?);
    }

    let mut rl = DefaultEditor::new()
        .map_err(|e| EcochatError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "ecochat chat".bold().green());
    println!(
        "provider {} · model {} · gateway {}",
        session.provider().to_string().cyan(),
        session.model().unwrap_or("none").cyan(),
        config.api.normalized_base_url()
    );
    println!("Type {} to exit, {} for commands.\n", "/quit".yellow(), "/help".yellow());

    let mut totals = Totals::default();
    let prompt = format!("{}> ", "you".green());
    loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        match parse_line(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => print_help(),
            ReplCommand::Clear => {
                session.reset();
                pending.clear();
                println!("{}", "conversation cleared".dimmed());
            }
            ReplCommand::Models => {
                print!("{}", render::render_catalog(Some(session.provider()), session.model()));
            }
            ReplCommand::Model(id) => {
                let id = qualify_model(session.provider(), &id);
                if session.select_model(&id) {
                    println!("{} {}", "model".dimmed(), id.cyan());
                } else {
                    eprintln!("{}: unknown or disabled model `{id}`", "warning".yellow());
                }
            }
            ReplCommand::Attach(path) => match load_attachment(&path).await {
                Ok(file) => {
                    println!(
                        "{} {} ({} bytes)",
                        "attached".dimmed(),
                        file.name,
                        file.len()
                    );
                    pending.push(file);
                }
                Err(e) => eprintln!("{}: {e}", "error".red()),
            },
            ReplCommand::Unknown(cmd) => {
                eprintln!("{}: unknown command `{cmd}`, try /help", "warning".yellow());
            }
            ReplCommand::Message(text) => {
                let files = std::mem::take(&mut pending);
                debug!(files = files.len(), "submitting message");
                let outcome = session.send(&text, files).await;
                let reply = session
                    .messages()
                    .last()
                    .map(|m| m.content.clone())
                    .unwrap_or_default();
                match outcome {
                    SendOutcome::Replied(usage) => {
                        println!("{}\n", reply);
                        println!("{}", render::format_usage(&usage).dimmed());
                        totals.add(&usage);
                    }
                    SendOutcome::Failed(_) => println!("{}", reply.red()),
                    SendOutcome::Ignored(reason) => {
                        eprintln!("{}: {reason}", "not sent".yellow());
                    }
                }
            }
        }
    }

    if totals.replies > 0 {
        println!(
            "{}",
            format!(
                "session: {} replies · {} tokens · €{:.4} · {:.3} gCO₂e",
                totals.replies, totals.tokens, totals.cost_eur, totals.est_co2e_g
            )
            .dimmed()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("/quit"), ReplCommand::Quit);
        assert_eq!(parse_line("  /exit "), ReplCommand::Quit);
        assert_eq!(parse_line("/clear"), ReplCommand::Clear);
        assert_eq!(parse_line("/models"), ReplCommand::Models);
        assert_eq!(
            parse_line("/model openai:gpt-4o"),
            ReplCommand::Model("openai:gpt-4o".into())
        );
        assert_eq!(
            parse_line("/attach ./report.pdf"),
            ReplCommand::Attach(PathBuf::from("./report.pdf"))
        );
    }

    #[test]
    fn commands_missing_arguments_are_unknown() {
        assert_eq!(parse_line("/model"), ReplCommand::Unknown("/model".into()));
        assert_eq!(parse_line("/attach   "), ReplCommand::Unknown("/attach".into()));
        assert_eq!(parse_line("/frobnicate"), ReplCommand::Unknown("/frobnicate".into()));
    }

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            parse_line("  how green is gpt-4o?  "),
            ReplCommand::Message("how green is gpt-4o?".into())
        );
    }

    #[test]
    fn short_model_ids_are_qualified() {
        assert_eq!(qualify_model(Provider::OpenAi, "gpt-4o"), "openai:gpt-4o");
        assert_eq!(
            qualify_model(Provider::OpenAi, "mistral:open-mistral-7b"),
            "mistral:open-mistral-7b"
        );
    }

    #[test]
    fn totals_accumulate() {
        let mut totals = Totals::default();
        let usage = UsageRecord {
            input_tokens: 3,
            output_tokens: 4,
            cost_eur: 0.5,
            est_co2e_g: 1.5,
            est_kwh: 0.0,
        };
        totals.add(&usage);
        totals.add(&usage);
        assert_eq!(totals.replies, 2);
        assert_eq!(totals.tokens, 14);
        assert_eq!(totals.cost_eur, 1.0);
        assert_eq!(totals.est_co2e_g, 3.0);
    }
}
