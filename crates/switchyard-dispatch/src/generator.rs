// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tiered generation: routed primary model, one alternate attempt, canned reply.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;
use switchyard_config::SwitchyardConfig;
use switchyard_core::{CustomerTier, GenerationBackend, ModelClass, SwitchyardError};
use switchyard_router::{ModelRouter, RoutingDecision, canned_response};
use tracing::{info, warn};
use uuid::Uuid;

use crate::cleaner::ResponseCleaner;
use crate::stats::ModelStats;

/// Model name reported when a canned reply answered the request.
pub const FALLBACK_MODEL: &str = "fallback";

/// Which step of the chain produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Primary,
    Alternate,
    Fallback,
}

/// Result of one `generate` call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub request_id: Uuid,
    pub content: String,
    /// Model that answered, or `"fallback"` for a canned reply.
    pub model_used: String,
    pub stage: Stage,
    pub decision: RoutingDecision,
    /// End-to-end latency in milliseconds, all attempts included.
    pub latency_ms: u64,
    pub timestamp: DateTime<Utc>,
    /// Last backend error, if any attempt failed.
    pub error: Option<String>,
}

/// Routes prompts and walks the primary -> alternate -> canned chain.
pub struct TieredGenerator {
    backend: Arc<dyn GenerationBackend>,
    router: ModelRouter,
    cleaner: ResponseCleaner,
    stats: Arc<ModelStats>,
    alternate_on_failure: bool,
    canned_fallback: bool,
}

impl TieredGenerator {
    pub fn new(config: &SwitchyardConfig, backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            router: ModelRouter::new(config.routing.clone(), config.models.clone()),
            cleaner: ResponseCleaner::new(&config.cleaner),
            stats: Arc::new(ModelStats::new(config.models.clone())),
            alternate_on_failure: config.routing.alternate_on_failure,
            canned_fallback: config.routing.canned_fallback,
        }
    }

    /// Share a stats collector with other dispatchers.
    pub fn with_stats(mut self, stats: Arc<ModelStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn router(&self) -> &ModelRouter {
        &self.router
    }

    pub fn stats(&self) -> &Arc<ModelStats> {
        &self.stats
    }

    /// Generate a reply for `prompt` on behalf of a `tier` customer.
    ///
    /// Returns `Unavailable` only when every permitted model failed and
    /// canned replies are disabled.
    pub async fn generate(
        &self,
        prompt: &str,
        tier: CustomerTier,
    ) -> Result<GenerationOutcome, SwitchyardError> {
        let start = Instant::now();
        let decision = self.router.route(prompt, tier);
        let mut attempted = Vec::with_capacity(2);

        let primary = self
            .attempt(decision.class, &decision.model, &decision.prompt)
            .await;
        attempted.push(decision.model.clone());
        let mut last_error = match primary {
            Ok(text) => {
                let model = decision.model.clone();
                return Ok(self.outcome(decision, model, text, Stage::Primary, start, None));
            }
            Err(e) => e,
        };

        let alternate_class = decision.class.other();
        let try_alternate =
            self.alternate_on_failure && self.router.permits(tier, alternate_class);
        if self.alternate_on_failure && !try_alternate {
            info!(%tier, "alternate model not permitted for tier, skipping");
        }

        if try_alternate {
            let alternate = decision.alternate_model.clone();
            warn!(
                primary = decision.model.as_str(),
                alternate = alternate.as_str(),
                error = %last_error,
                "primary model failed, trying alternate"
            );
            match self
                .attempt(alternate_class, &alternate, &decision.prompt)
                .await
            {
                Ok(text) => {
                    let error = Some(last_error.to_string());
                    return Ok(self.outcome(
                        decision,
                        alternate,
                        text,
                        Stage::Alternate,
                        start,
                        error,
                    ));
                }
                Err(e) => {
                    attempted.push(alternate);
                    last_error = e;
                }
            }
        }

        if !self.canned_fallback {
            warn!(?attempted, error = %last_error, "all models failed");
            return Err(SwitchyardError::Unavailable { attempted });
        }

        warn!(?attempted, error = %last_error, "all models failed, using canned reply");
        self.stats.record_fallback();
        let text = canned_response(&decision.prompt).to_string();
        Ok(self.outcome(
            decision,
            FALLBACK_MODEL.to_string(),
            text,
            Stage::Fallback,
            start,
            Some(last_error.to_string()),
        ))
    }

    /// One backend call with stats bookkeeping. Returns cleaned text.
    async fn attempt(
        &self,
        class: ModelClass,
        model: &str,
        prompt: &str,
    ) -> Result<String, SwitchyardError> {
        let start = Instant::now();
        let result = self.backend.generate(model, prompt).await;
        self.stats.record(class, start.elapsed(), result.is_ok());
        result.map(|completion| self.cleaner.clean(&completion.text))
    }

    fn outcome(
        &self,
        decision: RoutingDecision,
        model_used: String,
        content: String,
        stage: Stage,
        start: Instant,
        error: Option<String>,
    ) -> GenerationOutcome {
        let latency_ms = duration_ms(start.elapsed());
        info!(
            model = model_used.as_str(),
            %stage,
            complexity = %decision.complexity,
            latency_ms,
            "request complete"
        );
        GenerationOutcome {
            request_id: Uuid::new_v4(),
            content,
            model_used,
            stage,
            decision,
            latency_ms,
            timestamp: Utc::now(),
            error,
        }
    }
}

pub(crate) fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
