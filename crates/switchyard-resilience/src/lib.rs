// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilience primitives for Switchyard backends.
//!
//! - [`RetryPolicy`]: bounded exponential backoff for transient failures
//! - [`CircuitBreaker`]: per-model closed/open/half-open breaker
//! - [`BreakerRegistry`]: lazily created breakers keyed by model name

pub mod circuit_breaker;
pub mod retry;

pub use circuit_breaker::{
    BreakerRegistry, BreakerSnapshot, CircuitBreaker, CircuitBreakerConfig, CircuitState,
};
pub use retry::RetryPolicy;
