// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `switchyard shell` command implementation.
//!
//! Interactive REPL with a colored prompt and readline history. Each line is
//! routed and answered; `/stats` prints the running performance report.

use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use switchyard_config::SwitchyardConfig;
use switchyard_core::{CustomerTier, GenerationBackend, SwitchyardError};
use switchyard_dispatch::{AgentDispatcher, ModelStats, TieredGenerator};
use switchyard_ollama::OllamaBackend;
use tracing::warn;

/// A REPL line, parsed.
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Quit,
    Stats,
    Breakers,
    Help,
    ToggleAgents,
    SetTier(CustomerTier),
    BadTier(&'a str),
    Prompt(&'a str),
    Empty,
}

fn parse_line(line: &str) -> ShellCommand<'_> {
    let trimmed = line.trim();
    match trimmed {
        "" => ShellCommand::Empty,
        "/quit" | "/exit" => ShellCommand::Quit,
        "/stats" => ShellCommand::Stats,
        "/breakers" => ShellCommand::Breakers,
        "/help" => ShellCommand::Help,
        "/agents" => ShellCommand::ToggleAgents,
        _ => match trimmed.strip_prefix("/tier ") {
            Some(name) => match name.trim().parse() {
                Ok(tier) => ShellCommand::SetTier(tier),
                Err(_) => ShellCommand::BadTier(name.trim()),
            },
            // `/heavy ` and `/light ` fall through as prompts for the router.
            None => ShellCommand::Prompt(trimmed),
        },
    }
}

/// Runs the `switchyard shell` interactive REPL.
pub async fn run_shell(config: SwitchyardConfig, tier: CustomerTier) -> Result<(), SwitchyardError> {
    let ollama = Arc::new(OllamaBackend::new(&config)?);
    let breakers = ollama.breakers().clone();
    let backend: Arc<dyn GenerationBackend> = ollama;
    let stats = Arc::new(ModelStats::new(config.models.clone()));
    let generator = TieredGenerator::new(&config, backend.clone()).with_stats(stats.clone());
    let dispatcher = AgentDispatcher::new(&config, backend)?.with_stats(stats.clone());

    let mut rl = DefaultEditor::new()
        .map_err(|e| SwitchyardError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", config.service.name.bold().green());
    println!(
        "Type {} to exit, {} for commands.\n",
        "/quit".yellow(),
        "/help".yellow()
    );

    let mut tier = tier;
    let mut agents = false;
    loop {
        let prompt = format!("{} {}> ", "switchyard".green(), format!("[{tier}]").dimmed());
        match rl.readline(&prompt) {
            Ok(line) => {
                let command = parse_line(&line);
                if !matches!(command, ShellCommand::Empty) {
                    let _ = rl.add_history_entry(&line);
                }
                match command {
                    ShellCommand::Empty => continue,
                    ShellCommand::Quit => break,
                    ShellCommand::Stats => print!("{}", stats.report()),
                    ShellCommand::Breakers => {
                        let snapshot = breakers.snapshot();
                        if snapshot.is_empty() {
                            println!("{}", "no models called yet".dimmed());
                        }
                        for b in snapshot {
                            println!(
                                "  {:<20} {:<10} {} consecutive failure(s)",
                                b.model, b.state, b.consecutive_failures
                            );
                        }
                    }
                    ShellCommand::Help => print_help(),
                    ShellCommand::ToggleAgents => {
                        agents = !agents;
                        let mode = if agents { "agent" } else { "tiered" };
                        println!("{}", format!("switched to {mode} mode").dimmed());
                    }
                    ShellCommand::SetTier(next) => {
                        tier = next;
                        println!("{}", format!("tier set to {tier}").dimmed());
                    }
                    ShellCommand::BadTier(name) => {
                        eprintln!(
                            "{} unknown tier `{name}` (expected basic, premium, enterprise)",
                            "error:".red()
                        );
                    }
                    ShellCommand::Prompt(text) => {
                        if agents {
                            let outcome = dispatcher.process(text, tier).await;
                            println!("{}", outcome.content);
                            println!(
                                "{}",
                                format!(
                                    "[{} via {}, {} ms]",
                                    outcome.agent, outcome.model_used, outcome.latency_ms
                                )
                                .dimmed()
                            );
                        } else {
                            match generator.generate(text, tier).await {
                                Ok(outcome) => {
                                    println!("{}", outcome.content);
                                    println!(
                                        "{}",
                                        format!(
                                            "[{} ({}), {} ms]",
                                            outcome.model_used, outcome.stage, outcome.latency_ms
                                        )
                                        .dimmed()
                                    );
                                }
                                Err(e) => {
                                    warn!(error = %e, "generation failed");
                                    eprintln!("{} {e}", "error:".red());
                                }
                            }
                        }
                        println!();
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C clears the line.
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{} {e}", "readline error:".red());
                break;
            }
        }
    }

    let report = stats.report();
    if report.total_requests > 0 {
        println!("\n{}", "session summary".bold());
        print!("{report}");
    }
    println!("Goodbye!");
    Ok(())
}

fn print_help() {
    println!("  /tier <name>   switch customer tier (basic, premium, enterprise)");
    println!("  /agents        toggle agent-profile dispatch");
    println!("  /stats         show the performance report");
    println!("  /breakers      show circuit breaker state per model");
    println!("  /heavy <text>  force the heavyweight model for one prompt");
    println!("  /light <text>  force the lightweight model for one prompt");
    println!("  /quit          exit");
}
