// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Switchyard - tiered LLM request router.
//!
//! This is the binary entry point for Switchyard.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod classify;
mod doctor;
mod generate;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use switchyard_config::SwitchyardConfig;
use switchyard_core::{CustomerTier, SwitchyardError};

/// Switchyard - route prompts between a lightweight and a heavyweight model.
#[derive(Parser, Debug)]
#[command(name = "switchyard", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a reply for one prompt.
    Generate {
        /// The prompt text. Prefix with `/heavy ` or `/light ` to force a model.
        prompt: String,
        /// Customer tier (basic, premium, enterprise).
        #[arg(long)]
        tier: Option<CustomerTier>,
        /// Dispatch through agent profiles instead of the tiered router.
        #[arg(long)]
        agents: bool,
        /// Skip filler-sentence cleanup.
        #[arg(long)]
        raw: bool,
        /// Print the full outcome as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the routing decision for a prompt without calling a model.
    Classify {
        prompt: String,
        #[arg(long)]
        tier: Option<CustomerTier>,
        #[arg(long)]
        json: bool,
    },
    /// Launch an interactive REPL session.
    Shell {
        #[arg(long)]
        tier: Option<CustomerTier>,
    },
    /// Check configuration, server reachability, and model availability.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => switchyard_config::load_and_validate_path(path),
        None => switchyard_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            switchyard_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.service.log_level);

    let default_tier = config.routing.default_tier;
    let result = match cli.command {
        Some(Commands::Generate {
            prompt,
            tier,
            agents,
            raw,
            json,
        }) => {
            let opts = generate::GenerateOptions {
                tier: tier.unwrap_or(default_tier),
                agents,
                raw,
                json,
            };
            generate::run_generate(config, &prompt, opts).await
        }
        Some(Commands::Classify { prompt, tier, json }) => {
            classify::run_classify(&config, &prompt, tier.unwrap_or(default_tier), json)
        }
        Some(Commands::Shell { tier }) => {
            shell::run_shell(config, tier.unwrap_or(default_tier)).await
        }
        Some(Commands::Doctor { plain }) => {
            doctor::run_doctor(&config, cli.config.as_deref(), plain).await
        }
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("switchyard: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Prints the merged configuration as TOML.
fn print_config(config: &SwitchyardConfig) -> Result<(), SwitchyardError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| SwitchyardError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Initializes the tracing subscriber on stderr so stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("switchyard={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
