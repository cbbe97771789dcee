// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request dispatch for Switchyard.
//!
//! - [`TieredGenerator`]: routed model call with one alternate attempt and a canned reply
//! - [`AgentDispatcher`]: agent profiles with framed prompts and per-agent fallbacks
//! - [`ResponseCleaner`]: filler-sentence removal
//! - [`ModelStats`]: per-class counters and the [`PerformanceReport`]

pub mod agents;
pub mod cleaner;
pub mod generator;
pub mod stats;

pub use agents::{AgentDispatcher, AgentOutcome, AgentStatus};
pub use cleaner::ResponseCleaner;
pub use generator::{FALLBACK_MODEL, GenerationOutcome, Stage, TieredGenerator};
pub use stats::{ClassReport, ModelStats, PerformanceReport};
