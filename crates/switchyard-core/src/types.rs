// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the router, the backends, and the dispatch layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Customer pricing category used to bias model selection.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CustomerTier {
    #[default]
    Basic,
    Premium,
    Enterprise,
}

/// The two backend model classes, differing in size, cost, and latency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModelClass {
    /// Small, fast model for short or simple prompts.
    Lightweight,
    /// High-capacity model for complex prompts and enterprise customers.
    Heavyweight,
}

impl ModelClass {
    /// The class tried once when this one fails.
    pub fn other(self) -> Self {
        match self {
            ModelClass::Lightweight => ModelClass::Heavyweight,
            ModelClass::Heavyweight => ModelClass::Lightweight,
        }
    }
}

/// Health status reported by backend health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Backend is reachable and every configured model is available.
    Healthy,
    /// Backend is reachable but something is missing.
    Degraded(String),
    /// Backend is not reachable.
    Unhealthy(String),
}

/// A completed generation returned by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Generated text.
    pub text: String,
    /// Model that produced the text.
    pub model: String,
    /// Wall-clock time spent in the backend, retries included.
    pub latency: Duration,
}
