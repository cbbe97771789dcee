// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generation backend for deterministic testing.
//!
//! `MockBackend` implements `GenerationBackend` with per-model scripted
//! replies and failures, and records every call it receives.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use switchyard_core::{Completion, GenerationBackend, HealthStatus, SwitchyardError};

#[derive(Default)]
struct State {
    scripted: HashMap<String, VecDeque<Result<String, String>>>,
    failing: HashSet<String>,
    installed: Vec<String>,
    calls: Vec<(String, String)>,
}

/// A mock backend with scripted replies per model.
///
/// Lookup order for each call: a scripted reply queued for the model, then a
/// permanent failure if the model is marked failing, then a default reply of
/// `"mock response from {model}"`.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<State>>,
    latency: Duration,
}

impl MockBackend {
    /// Create a backend that answers every model with the default reply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every `generate` call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Queue a successful reply for a model.
    pub async fn push_reply(&self, model: &str, text: &str) {
        self.push(model, Ok(text.to_string())).await;
    }

    /// Queue a single retryable failure for a model.
    pub async fn push_failure(&self, model: &str, message: &str) {
        self.push(model, Err(message.to_string())).await;
    }

    async fn push(&self, model: &str, reply: Result<String, String>) {
        self.state
            .lock()
            .await
            .scripted
            .entry(model.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Make every unscripted call to `model` fail.
    pub async fn fail_model(&self, model: &str) {
        self.state.lock().await.failing.insert(model.to_string());
    }

    /// Models reported by `available_models`. Empty means none installed.
    pub async fn set_installed(&self, models: &[&str]) {
        self.state.lock().await.installed = models.iter().map(|m| m.to_string()).collect();
    }

    /// Every `(model, prompt)` pair received, in order.
    pub async fn calls(&self) -> Vec<(String, String)> {
        self.state.lock().await.calls.clone()
    }

    /// Models called, in order.
    pub async fn models_called(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .map(|(model, _)| model.clone())
            .collect()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<Completion, SwitchyardError> {
        let reply = {
            let mut state = self.state.lock().await;
            state.calls.push((model.to_string(), prompt.to_string()));
            match state.scripted.get_mut(model).and_then(VecDeque::pop_front) {
                Some(reply) => reply,
                None if state.failing.contains(model) => {
                    Err(format!("model {model} is unavailable"))
                }
                None => Ok(format!("mock response from {model}")),
            }
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match reply {
            Ok(text) => Ok(Completion {
                text,
                model: model.to_string(),
                latency: self.latency,
            }),
            Err(message) => Err(SwitchyardError::backend(message, true)),
        }
    }

    async fn available_models(&self) -> Result<Vec<String>, SwitchyardError> {
        Ok(self.state.lock().await.installed.clone())
    }

    async fn health_check(&self) -> Result<HealthStatus, SwitchyardError> {
        Ok(HealthStatus::Healthy)
    }
}
