// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-model circuit breaker.
//!
//! Closed -> Open after `failure_threshold` consecutive failed requests.
//! Open rejects without touching the network until the cooldown elapses,
//! then a single probe runs in HalfOpen: success closes the circuit,
//! failure reopens it for another cooldown.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;
use switchyard_core::SwitchyardError;
use tokio::time::Instant;
use tracing::{info, warn};

/// Circuit breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CircuitState {
    /// Requests flow normally.
    #[default]
    Closed,
    /// Requests are rejected until the given instant.
    Open { until: Instant },
    /// One probe request is allowed through.
    HalfOpen,
}

impl CircuitState {
    /// Short label for logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open { .. } => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

/// Breaker thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircuitBreakerConfig {
    /// Consecutive failed requests before the circuit opens.
    pub failure_threshold: u32,
    /// How long the circuit stays open before a probe is allowed.
    pub cooldown: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            cooldown: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: CircuitState,
    consecutive_failures: u32,
    probe_in_flight: bool,
}

/// Circuit breaker guarding one model.
#[derive(Debug)]
pub struct CircuitBreaker {
    model: String,
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    /// Create a closed breaker for `model`.
    pub fn new(model: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            model: model.into(),
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Model this breaker guards.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, SwitchyardError> {
        self.inner.lock().map_err(|e| {
            SwitchyardError::Internal(format!("circuit breaker lock poisoned: {e}"))
        })
    }

    /// Current state, with an elapsed cooldown reported as HalfOpen.
    pub fn state(&self) -> Result<CircuitState, SwitchyardError> {
        let inner = self.lock()?;
        Ok(match inner.state {
            CircuitState::Open { until } if Instant::now() >= until => CircuitState::HalfOpen,
            state => state,
        })
    }

    /// Consecutive failures recorded since the last success.
    pub fn consecutive_failures(&self) -> Result<u32, SwitchyardError> {
        Ok(self.lock()?.consecutive_failures)
    }

    /// Ask permission to send a request.
    ///
    /// Returns `CircuitOpen` while the circuit is open, or while a half-open
    /// probe is already in flight.
    pub fn try_acquire(&self) -> Result<(), SwitchyardError> {
        self.acquire().map(|_| ())
    }

    /// Like `try_acquire`, but reports whether this caller holds the probe.
    fn acquire(&self) -> Result<bool, SwitchyardError> {
        let mut inner = self.lock()?;
        match inner.state {
            CircuitState::Closed => Ok(false),
            CircuitState::Open { until } if Instant::now() < until => {
                Err(SwitchyardError::CircuitOpen {
                    model: self.model.clone(),
                })
            }
            CircuitState::Open { .. } | CircuitState::HalfOpen => {
                if inner.probe_in_flight {
                    return Err(SwitchyardError::CircuitOpen {
                        model: self.model.clone(),
                    });
                }
                inner.state = CircuitState::HalfOpen;
                inner.probe_in_flight = true;
                info!(model = self.model.as_str(), "circuit half-open, sending probe");
                Ok(true)
            }
        }
    }

    /// A probe whose caller went away counts as a failed probe.
    fn abandon_probe(&self) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if !inner.probe_in_flight {
            return;
        }
        inner.probe_in_flight = false;
        inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
        inner.state = CircuitState::Open {
            until: Instant::now() + self.config.cooldown,
        };
        warn!(model = self.model.as_str(), "probe abandoned, circuit reopened");
    }

    /// Record a successful request.
    pub fn record_success(&self) -> Result<(), SwitchyardError> {
        let mut inner = self.lock()?;
        if inner.state != CircuitState::Closed {
            info!(model = self.model.as_str(), "circuit closed");
        }
        *inner = Inner::default();
        Ok(())
    }

    /// Record a failed request (retries already exhausted).
    pub fn record_failure(&self) -> Result<(), SwitchyardError> {
        let mut inner = self.lock()?;
        inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
        let reopen = inner.state == CircuitState::HalfOpen
            || inner.consecutive_failures >= self.config.failure_threshold;
        inner.probe_in_flight = false;
        if reopen {
            inner.state = CircuitState::Open {
                until: Instant::now() + self.config.cooldown,
            };
            warn!(
                model = self.model.as_str(),
                failures = inner.consecutive_failures,
                cooldown_secs = self.config.cooldown.as_secs(),
                "circuit opened"
            );
        }
        Ok(())
    }

    /// Run `op` through the breaker.
    ///
    /// An open circuit returns `CircuitOpen` without calling `op`. Only
    /// retryable errors (transport failures, 5xx, timeouts) count against the
    /// circuit; a rejected request still ends a half-open probe. Dropping the
    /// returned future during a probe reopens the circuit.
    pub async fn call<T, F, Fut>(&self, op: F) -> Result<T, SwitchyardError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, SwitchyardError>>,
    {
        let mut guard = ProbeGuard {
            breaker: self,
            armed: self.acquire()?,
        };
        let result = op().await;
        guard.disarm();
        match result {
            Ok(value) => {
                self.record_success()?;
                Ok(value)
            }
            Err(err) => {
                if err.is_retryable() || self.state()? == CircuitState::HalfOpen {
                    self.record_failure()?;
                }
                Err(err)
            }
        }
    }
}

/// Ends a half-open probe if its future is dropped before completing.
struct ProbeGuard<'a> {
    breaker: &'a CircuitBreaker,
    armed: bool,
}

impl ProbeGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.breaker.abandon_probe();
        }
    }
}

/// Point-in-time view of one breaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakerSnapshot {
    pub model: String,
    pub state: &'static str,
    pub consecutive_failures: u32,
}

/// Lazily created breakers, one per model name.
#[derive(Debug, Default)]
pub struct BreakerRegistry {
    config: CircuitBreakerConfig,
    breakers: DashMap<String, Arc<CircuitBreaker>>,
}

impl BreakerRegistry {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            breakers: DashMap::new(),
        }
    }

    /// Breaker for `model`, created closed on first use.
    pub fn get(&self, model: &str) -> Arc<CircuitBreaker> {
        if let Some(breaker) = self.breakers.get(model) {
            return breaker.clone();
        }
        self.breakers
            .entry(model.to_string())
            .or_insert_with(|| Arc::new(CircuitBreaker::new(model, self.config)))
            .clone()
    }

    /// Snapshot every breaker created so far, sorted by model name.
    pub fn snapshot(&self) -> Vec<BreakerSnapshot> {
        let mut snapshots: Vec<BreakerSnapshot> = self
            .breakers
            .iter()
            .map(|entry| {
                let breaker = entry.value();
                BreakerSnapshot {
                    model: breaker.model().to_string(),
                    state: breaker.state().map(|s| s.label()).unwrap_or("unknown"),
                    consecutive_failures: breaker.consecutive_failures().unwrap_or(0),
                }
            })
            .collect();
        snapshots.sort_by(|a, b| a.model.cmp(&b.model));
        snapshots
    }
}
