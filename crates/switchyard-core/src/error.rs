// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Switchyard model router.

use thiserror::Error;

/// The primary error type used across backends, routing, and dispatch.
#[derive(Debug, Error)]
pub enum SwitchyardError {
    /// Configuration errors (invalid values, unknown tiers, bad URLs).
    #[error("configuration error: {0}")]
    Config(String),

    /// A generation backend failed to produce a completion.
    #[error("backend error: {message}")]
    Backend {
        message: String,
        /// Whether retrying the same request could succeed (transport errors, 5xx).
        retryable: bool,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The circuit breaker for a model is open; no request was sent.
    #[error("circuit open for model {model}")]
    CircuitOpen { model: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Every model that was tried failed.
    #[error("all models unavailable (tried: {})", attempted.join(", "))]
    Unavailable { attempted: Vec<String> },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SwitchyardError {
    /// Shorthand for a backend error without an underlying source.
    pub fn backend(message: impl Into<String>, retryable: bool) -> Self {
        Self::Backend {
            message: message.into(),
            retryable,
            source: None,
        }
    }

    /// Returns true when the same request may succeed if sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Backend { retryable, .. } => *retryable,
            Self::Timeout { .. } => true,
            _ => false,
        }
    }
}
