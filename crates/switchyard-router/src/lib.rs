// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt classification and tiered model routing for Switchyard.
//!
//! This crate provides:
//! - [`QueryClassifier`]: Keyword and length heuristics grading prompt complexity
//! - [`ModelRouter`]: Tier-aware model selection with per-message overrides
//! - [`AgentRegistry`]: Keyword-matched agent profiles for agent-mode dispatch
//! - [`canned_response`]: Topical replies used when no model answers

pub mod agents;
pub mod classifier;
pub mod fallback;
pub mod router;

pub use agents::{AgentProfile, AgentRegistry};
pub use classifier::{ClassificationResult, QueryClassifier, TaskComplexity};
pub use fallback::{FallbackTopic, canned_response, fallback_topic};
pub use router::{ModelRouter, RoutingDecision, parse_model_override, select_class, tier_permits};
