// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend trait for inference servers that generate text by model name.

use async_trait::async_trait;

use crate::error::SwitchyardError;
use crate::types::{Completion, HealthStatus};

/// A text-generation backend addressed by model name.
///
/// Implementations own their transport concerns (timeouts, retries, circuit
/// breaking). Callers only choose which model to ask.
#[async_trait]
pub trait GenerationBackend: Send + Sync + 'static {
    /// Returns the human-readable name of this backend instance.
    fn name(&self) -> &str;

    /// Generates a completion for `prompt` using `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<Completion, SwitchyardError>;

    /// Lists the model names the backend can serve.
    async fn available_models(&self) -> Result<Vec<String>, SwitchyardError>;

    /// Performs a health check and returns the backend's current status.
    async fn health_check(&self) -> Result<HealthStatus, SwitchyardError>;
}
