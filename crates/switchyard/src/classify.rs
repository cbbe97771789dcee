// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `switchyard classify` command implementation.
//!
//! Prints the routing decision for a prompt. No model is called.

use switchyard_config::SwitchyardConfig;
use switchyard_core::{CustomerTier, SwitchyardError};
use switchyard_router::{ModelRouter, RoutingDecision};

/// Runs the `switchyard classify` command.
pub fn run_classify(
    config: &SwitchyardConfig,
    prompt: &str,
    tier: CustomerTier,
    json: bool,
) -> Result<(), SwitchyardError> {
    let router = ModelRouter::new(config.routing.clone(), config.models.clone());
    let decision = router.route(prompt, tier);

    if json {
        let rendered = serde_json::to_string_pretty(&decision)
            .map_err(|e| SwitchyardError::Internal(format!("failed to serialize decision: {e}")))?;
        println!("{rendered}");
    } else {
        print!("{}", describe(&decision));
    }
    Ok(())
}

/// Human-readable summary of a routing decision.
fn describe(decision: &RoutingDecision) -> String {
    let overridden = if decision.overridden { " (override)" } else { "" };
    format!(
        "tier:       {}\ncomplexity: {}\nclass:      {}{overridden}\nmodel:      {}\nalternate:  {}\nreason:     {}\n",
        decision.tier,
        decision.complexity,
        decision.class,
        decision.model,
        decision.alternate_model,
        decision.reason,
    )
}
