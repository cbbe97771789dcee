// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Switchyard model router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use switchyard_core::{CustomerTier, ModelClass};

/// Top-level Switchyard configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchyardConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Inference server connection settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Model names for each model class.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Tiered routing policy.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Circuit breaker settings.
    #[serde(default)]
    pub resilience: ResilienceConfig,

    /// Response post-processing.
    #[serde(default)]
    pub cleaner: CleanerConfig,

    /// Agent profiles for agent-mode dispatch. Empty means the built-in set.
    #[serde(default)]
    pub agents: Vec<AgentProfileConfig>,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name used in logs and the shell banner.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "switchyard".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Inference server (Ollama-compatible) connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL of the server; `/api/generate` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Attempts per request against one model (first try included).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff delay in milliseconds, doubled after each failed attempt.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Idle keep-alive connections kept per host.
    #[serde(default = "default_max_idle_connections")]
    pub max_idle_connections: usize,

    /// Sampling temperature sent with each request. `None` lets the server decide.
    #[serde(default = "default_temperature")]
    pub temperature: Option<f32>,

    /// Nucleus sampling cutoff sent with each request. `None` lets the server decide.
    #[serde(default = "default_top_p")]
    pub top_p: Option<f32>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            max_idle_connections: default_max_idle_connections(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_max_idle_connections() -> usize {
    10
}

fn default_temperature() -> Option<f32> {
    Some(0.7)
}

fn default_top_p() -> Option<f32> {
    Some(0.9)
}

/// Model names for the two model classes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    /// Small, fast model.
    #[serde(default = "default_lightweight_model")]
    pub lightweight: String,

    /// High-capacity model.
    #[serde(default = "default_heavyweight_model")]
    pub heavyweight: String,
}

impl ModelsConfig {
    /// Model name configured for a class.
    pub fn name_for(&self, class: ModelClass) -> &str {
        match class {
            ModelClass::Lightweight => &self.lightweight,
            ModelClass::Heavyweight => &self.heavyweight,
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            lightweight: default_lightweight_model(),
            heavyweight: default_heavyweight_model(),
        }
    }
}

fn default_lightweight_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_heavyweight_model() -> String {
    "gpt-oss:20b".to_string()
}

/// Tiered routing policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Tier assumed when a request does not name one.
    #[serde(default)]
    pub default_tier: CustomerTier,

    /// Prompts with more words than this are graded complex.
    #[serde(default = "default_long_prompt_words")]
    pub long_prompt_words: usize,

    /// Whether basic-tier customers may be routed to the heavyweight model.
    #[serde(default = "default_true")]
    pub basic_allows_heavyweight: bool,

    /// Route every request to this class regardless of tier or prompt.
    #[serde(default)]
    pub force_class: Option<ModelClass>,

    /// Retry once against the other model class when the primary fails.
    #[serde(default = "default_true")]
    pub alternate_on_failure: bool,

    /// Answer with a canned reply when every model fails.
    #[serde(default = "default_true")]
    pub canned_fallback: bool,

    /// Profile used by agent dispatch when no profile keywords match.
    #[serde(default = "default_agent")]
    pub default_agent: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_tier: CustomerTier::default(),
            long_prompt_words: default_long_prompt_words(),
            basic_allows_heavyweight: true,
            force_class: None,
            alternate_on_failure: true,
            canned_fallback: true,
            default_agent: default_agent(),
        }
    }
}

fn default_long_prompt_words() -> usize {
    50
}

fn default_true() -> bool {
    true
}

fn default_agent() -> String {
    "chat".to_string()
}

/// Circuit breaker configuration (one breaker per model).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResilienceConfig {
    /// Consecutive failed requests before the circuit opens.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// Seconds the circuit stays open before a probe is allowed.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

fn default_failure_threshold() -> u32 {
    5
}

fn default_cooldown_secs() -> u64 {
    15
}

/// Response cleaner configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CleanerConfig {
    /// Strip filler sentences from model output.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Text returned when cleaning leaves nothing.
    #[serde(default = "default_empty_placeholder")]
    pub empty_placeholder: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            empty_placeholder: default_empty_placeholder(),
        }
    }
}

fn default_empty_placeholder() -> String {
    "Completed.".to_string()
}

/// An agent profile for agent-mode dispatch, defined via `[[agents]]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentProfileConfig {
    /// Unique profile name.
    pub name: String,

    /// System prompt prepended to the user prompt.
    pub system_prompt: String,

    /// Preferred model class for non-basic tiers.
    #[serde(default = "default_agent_class")]
    pub model_class: ModelClass,

    /// Whole-word triggers; the first profile with a match wins.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Canned reply when the model call fails.
    #[serde(default)]
    pub fallback: Option<String>,
}

fn default_agent_class() -> ModelClass {
    ModelClass::Heavyweight
}
