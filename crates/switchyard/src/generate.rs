// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `switchyard generate` command implementation.
//!
//! Sends one prompt through the tiered generator (or the agent dispatcher
//! with `--agents`) and prints the reply on stdout.

use std::sync::Arc;

use switchyard_config::SwitchyardConfig;
use switchyard_core::{CustomerTier, GenerationBackend, SwitchyardError};
use switchyard_dispatch::{AgentDispatcher, TieredGenerator};
use switchyard_ollama::OllamaBackend;
use tracing::debug;

/// Flags accepted by `switchyard generate`.
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub tier: CustomerTier,
    pub agents: bool,
    pub raw: bool,
    pub json: bool,
}

/// Runs the `switchyard generate` command.
pub async fn run_generate(
    mut config: SwitchyardConfig,
    prompt: &str,
    opts: GenerateOptions,
) -> Result<(), SwitchyardError> {
    if opts.raw {
        config.cleaner.enabled = false;
    }

    let backend: Arc<dyn GenerationBackend> = Arc::new(OllamaBackend::new(&config)?);
    debug!(tier = %opts.tier, agents = opts.agents, "dispatching prompt");

    if opts.agents {
        let dispatcher = AgentDispatcher::new(&config, backend)?;
        let outcome = dispatcher.process(prompt, opts.tier).await;
        if opts.json {
            print_json(&outcome)?;
        } else {
            println!("{}", outcome.content);
        }
        return Ok(());
    }

    let generator = TieredGenerator::new(&config, backend);
    let outcome = generator.generate(prompt, opts.tier).await?;
    if opts.json {
        print_json(&outcome)?;
    } else {
        println!("{}", outcome.content);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), SwitchyardError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| SwitchyardError::Internal(format!("failed to serialize outcome: {e}")))?;
    println!("{rendered}");
    Ok(())
}
