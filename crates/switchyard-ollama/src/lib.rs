// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama backend for Switchyard.
//!
//! This crate implements [`GenerationBackend`] for an Ollama-compatible
//! server. Each request passes through a per-model circuit breaker before any
//! network I/O; the HTTP client retries transient failures underneath it, so
//! one exhausted request counts as one breaker failure.

pub mod client;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use switchyard_config::SwitchyardConfig;
use switchyard_config::model::ModelsConfig;
use switchyard_core::{Completion, GenerationBackend, HealthStatus, SwitchyardError};
use switchyard_resilience::{BreakerRegistry, CircuitBreakerConfig};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::client::{OllamaClient, is_transport_error};

/// Ollama backend implementing [`GenerationBackend`].
pub struct OllamaBackend {
    client: OllamaClient,
    breakers: Arc<BreakerRegistry>,
    models: ModelsConfig,
}

impl OllamaBackend {
    /// Creates a backend from the full configuration.
    pub fn new(config: &SwitchyardConfig) -> Result<Self, SwitchyardError> {
        let client = OllamaClient::new(&config.ollama)?;
        let breakers = Arc::new(BreakerRegistry::new(CircuitBreakerConfig {
            failure_threshold: config.resilience.failure_threshold,
            cooldown: std::time::Duration::from_secs(config.resilience.cooldown_secs),
        }));

        info!(
            base_url = client.base_url(),
            lightweight = config.models.lightweight.as_str(),
            heavyweight = config.models.heavyweight.as_str(),
            "ollama backend initialized"
        );

        Ok(Self::with_client(client, breakers, config.models.clone()))
    }

    /// Creates a backend around an existing client and breaker registry.
    pub fn with_client(
        client: OllamaClient,
        breakers: Arc<BreakerRegistry>,
        models: ModelsConfig,
    ) -> Self {
        Self {
            client,
            breakers,
            models,
        }
    }

    /// The per-model circuit breakers.
    pub fn breakers(&self) -> &Arc<BreakerRegistry> {
        &self.breakers
    }
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<Completion, SwitchyardError> {
        let breaker = self.breakers.get(model);
        let start = Instant::now();
        let response = breaker.call(|| self.client.generate(model, prompt)).await?;
        let latency = start.elapsed();

        debug!(
            model,
            latency_ms = latency.as_millis() as u64,
            eval_count = response.eval_count,
            "generation complete"
        );

        Ok(Completion {
            text: response.response,
            model: model.to_string(),
            latency,
        })
    }

    async fn available_models(&self) -> Result<Vec<String>, SwitchyardError> {
        self.client.list_models().await
    }

    async fn health_check(&self) -> Result<HealthStatus, SwitchyardError> {
        let installed = match self.client.list_models().await {
            Ok(models) => models,
            Err(e) if is_transport_error(&e) => {
                return Ok(HealthStatus::Unhealthy(format!(
                    "cannot reach {}: {e}",
                    self.client.base_url()
                )));
            }
            Err(e) => {
                return Ok(HealthStatus::Degraded(format!(
                    "{} is reachable but listing models failed: {e}",
                    self.client.base_url()
                )));
            }
        };

        let missing: Vec<&str> = [
            self.models.lightweight.as_str(),
            self.models.heavyweight.as_str(),
        ]
        .into_iter()
        .filter(|wanted| !installed.iter().any(|m| model_matches(m, wanted)))
        .collect();

        if missing.is_empty() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(format!(
                "missing models: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Whether an installed model name satisfies a configured one.
/// The server reports untagged models with an explicit `:latest`.
fn model_matches(installed: &str, wanted: &str) -> bool {
    installed == wanted || installed.strip_suffix(":latest") == Some(wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_tag_is_implicit() {
        assert!(model_matches("phi3:latest", "phi3"));
        assert!(model_matches("gpt-oss:20b", "gpt-oss:20b"));
        assert!(!model_matches("gpt-oss:120b", "gpt-oss:20b"));
    }
}
