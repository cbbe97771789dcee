// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tier-aware model routing with per-message overrides.
//!
//! Orchestrates model selection: per-message override > global force > classify + tier table.

use serde::Serialize;
use switchyard_config::model::{ModelsConfig, RoutingConfig};
use switchyard_core::{CustomerTier, ModelClass};
use tracing::{debug, warn};

use crate::classifier::{ClassificationResult, QueryClassifier, TaskComplexity};

/// Routing decision for a single prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingDecision {
    /// Selected model class.
    pub class: ModelClass,
    /// Model name for the selected class.
    pub model: String,
    /// Model of the other class, tried once if the primary fails.
    pub alternate_model: String,
    /// Classified complexity of the prompt.
    pub complexity: TaskComplexity,
    /// Customer tier the decision was made for.
    pub tier: CustomerTier,
    /// Human-readable reason for the decision.
    pub reason: String,
    /// Whether a per-message or global override chose the class.
    pub overridden: bool,
    /// Prompt text to send, with any override prefix stripped.
    pub prompt: String,
}

/// Pick a model class from prompt complexity and customer tier.
///
/// Enterprise always gets the heavyweight model. Critical and complex prompts
/// get it too, unless the tier is basic and basic tiers are capped.
pub fn select_class(
    complexity: TaskComplexity,
    tier: CustomerTier,
    basic_allows_heavyweight: bool,
) -> ModelClass {
    if tier == CustomerTier::Enterprise {
        return ModelClass::Heavyweight;
    }
    match complexity {
        TaskComplexity::Critical | TaskComplexity::Complex => {
            if tier == CustomerTier::Basic && !basic_allows_heavyweight {
                ModelClass::Lightweight
            } else {
                ModelClass::Heavyweight
            }
        }
        TaskComplexity::Simple | TaskComplexity::Medium => ModelClass::Lightweight,
    }
}

/// Whether `tier` may be served by `class` under the configured policy.
pub fn tier_permits(
    tier: CustomerTier,
    class: ModelClass,
    basic_allows_heavyweight: bool,
) -> bool {
    basic_allows_heavyweight || tier != CustomerTier::Basic || class == ModelClass::Lightweight
}

/// Orchestrates model selection with classification, tier policy, and overrides.
#[derive(Debug, Clone)]
pub struct ModelRouter {
    classifier: QueryClassifier,
    routing: RoutingConfig,
    models: ModelsConfig,
}

impl ModelRouter {
    /// Create a router from the routing policy and the configured model names.
    pub fn new(routing: RoutingConfig, models: ModelsConfig) -> Self {
        Self {
            classifier: QueryClassifier::with_long_prompt_words(routing.long_prompt_words),
            routing,
            models,
        }
    }

    /// Classify a prompt without routing it.
    pub fn classify(&self, prompt: &str) -> ClassificationResult {
        self.classifier.classify(prompt)
    }

    /// Whether the policy lets `tier` use `class`.
    pub fn permits(&self, tier: CustomerTier, class: ModelClass) -> bool {
        tier_permits(tier, class, self.routing.basic_allows_heavyweight)
    }

    /// Model name configured for a class.
    pub fn model_for(&self, class: ModelClass) -> &str {
        self.models.name_for(class)
    }

    /// Route a prompt for a customer tier.
    ///
    /// Priority order:
    /// 1. Per-message override (`/heavy `, `/light `)
    /// 2. Global `routing.force_class`
    /// 3. Heuristic classification + tier selection table
    ///
    /// Overrides that would put a capped basic tier on the heavyweight model
    /// are ignored and routing falls through to the next step.
    pub fn route(&self, prompt: &str, tier: CustomerTier) -> RoutingDecision {
        let (override_class, text) = parse_model_override(prompt);
        let classification = self.classifier.classify(text);

        if let Some(class) = override_class {
            if self.permits(tier, class) {
                return self.decision(
                    class,
                    &classification,
                    tier,
                    "per-message override",
                    true,
                    text,
                );
            }
            warn!(%tier, %class, "per-message override refused by tier policy");
        }

        if let Some(class) = self.routing.force_class {
            if self.permits(tier, class) {
                return self.decision(
                    class,
                    &classification,
                    tier,
                    "global force_class config",
                    true,
                    text,
                );
            }
            warn!(%tier, %class, "force_class refused by tier policy");
        }

        let class = select_class(
            classification.complexity,
            tier,
            self.routing.basic_allows_heavyweight,
        );
        let reason = if tier == CustomerTier::Enterprise {
            "enterprise tier"
        } else {
            classification.reason
        };
        let decision = self.decision(class, &classification, tier, reason, false, text);

        debug!(
            complexity = %decision.complexity,
            %tier,
            model = decision.model.as_str(),
            reason = decision.reason.as_str(),
            "routed prompt"
        );
        decision
    }

    fn decision(
        &self,
        class: ModelClass,
        classification: &ClassificationResult,
        tier: CustomerTier,
        reason: &str,
        overridden: bool,
        text: &str,
    ) -> RoutingDecision {
        let reason = match classification.matched {
            Some(kw) if !overridden => format!("{reason} ({kw})"),
            _ => reason.to_string(),
        };
        RoutingDecision {
            class,
            model: self.models.name_for(class).to_string(),
            alternate_model: self.models.name_for(class.other()).to_string(),
            complexity: classification.complexity,
            tier,
            reason,
            overridden,
            prompt: text.to_string(),
        }
    }
}

/// Parse a per-message model override prefix from user input.
///
/// Supports `/heavy ` and `/light ` prefixes (with trailing space).
/// Returns `(Some(class), rest_of_message)` if an override is found,
/// or `(None, original_message)` if no override.
pub fn parse_model_override(text: &str) -> (Option<ModelClass>, &str) {
    let trimmed = text.trim_start();
    if let Some(rest) = trimmed.strip_prefix("/heavy ") {
        (Some(ModelClass::Heavyweight), rest)
    } else if let Some(rest) = trimmed.strip_prefix("/light ") {
        (Some(ModelClass::Lightweight), rest)
    } else {
        (None, text)
    }
}
