// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent-mode dispatch: profile selection, prompt framing, single model call.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;
use switchyard_config::SwitchyardConfig;
use switchyard_config::model::ModelsConfig;
use switchyard_core::{CustomerTier, GenerationBackend, SwitchyardError};
use switchyard_router::{AgentRegistry, parse_model_override};
use tracing::{info, warn};
use uuid::Uuid;

use crate::cleaner::ResponseCleaner;
use crate::generator::{FALLBACK_MODEL, duration_ms};
use crate::stats::ModelStats;

/// Whether the agent's model answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgentStatus {
    Operational,
    FallbackActive,
}

/// Result of one agent-mode request.
#[derive(Debug, Clone, Serialize)]
pub struct AgentOutcome {
    pub request_id: Uuid,
    /// Profile that handled the prompt.
    pub agent: String,
    /// Model that answered, or `"fallback"` for the profile's canned reply.
    pub model_used: String,
    pub content: String,
    pub status: AgentStatus,
    pub latency_ms: u64,
    pub timestamp: DateTime<Utc>,
    pub error: Option<String>,
}

/// Dispatches prompts to keyword-matched agent profiles.
pub struct AgentDispatcher {
    backend: Arc<dyn GenerationBackend>,
    registry: AgentRegistry,
    models: ModelsConfig,
    cleaner: ResponseCleaner,
    stats: Arc<ModelStats>,
}

impl AgentDispatcher {
    /// Build a dispatcher from `[[agents]]` (or the built-in profiles).
    pub fn new(
        config: &SwitchyardConfig,
        backend: Arc<dyn GenerationBackend>,
    ) -> Result<Self, SwitchyardError> {
        Ok(Self {
            backend,
            registry: AgentRegistry::from_config(&config.agents, &config.routing.default_agent)?,
            models: config.models.clone(),
            cleaner: ResponseCleaner::new(&config.cleaner),
            stats: Arc::new(ModelStats::new(config.models.clone())),
        })
    }

    /// Share a stats collector with other dispatchers.
    pub fn with_stats(mut self, stats: Arc<ModelStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Handle a prompt with the matching agent. Never fails: a model error
    /// yields the agent's canned reply with status `fallback_active`.
    ///
    /// A `/heavy ` or `/light ` prefix is stripped before framing and picks
    /// the model class for premium and enterprise tiers. Basic tier stays on
    /// the lightweight model.
    pub async fn process(&self, prompt: &str, tier: CustomerTier) -> AgentOutcome {
        let start = Instant::now();
        let (override_class, text) = parse_model_override(prompt);
        let profile = self.registry.classify(text);
        let class = match override_class {
            Some(class) if tier != CustomerTier::Basic => class,
            _ => AgentRegistry::class_for_tier(profile, tier),
        };
        let model = self.models.name_for(class);
        let framed = profile.enhance(text);

        let call_start = Instant::now();
        let result = self.backend.generate(model, &framed).await;
        self.stats.record(class, call_start.elapsed(), result.is_ok());

        let (model_used, content, status, error) = match result {
            Ok(completion) => (
                model.to_string(),
                self.cleaner.clean(&completion.text),
                AgentStatus::Operational,
                None,
            ),
            Err(e) => {
                warn!(
                    agent = profile.name.as_str(),
                    model,
                    error = %e,
                    "agent model failed, using canned reply"
                );
                self.stats.record_fallback();
                (
                    FALLBACK_MODEL.to_string(),
                    profile.fallback.clone(),
                    AgentStatus::FallbackActive,
                    Some(e.to_string()),
                )
            }
        };

        let latency_ms = duration_ms(start.elapsed());
        info!(
            agent = profile.name.as_str(),
            model = model_used.as_str(),
            %status,
            latency_ms,
            "agent request complete"
        );

        AgentOutcome {
            request_id: Uuid::new_v4(),
            agent: profile.name.clone(),
            model_used,
            content,
            status,
            latency_ms,
            timestamp: Utc::now(),
            error,
        }
    }
}
