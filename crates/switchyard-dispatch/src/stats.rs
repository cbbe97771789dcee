// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-class request statistics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use switchyard_config::model::ModelsConfig;
use switchyard_core::ModelClass;

#[derive(Debug, Default)]
struct ClassCounters {
    requests: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    /// Summed over successful calls only.
    success_latency_micros: AtomicU64,
}

/// Lock-free request counters for both model classes.
#[derive(Debug, Default)]
pub struct ModelStats {
    models: ModelsConfig,
    lightweight: ClassCounters,
    heavyweight: ClassCounters,
    fallbacks: AtomicU64,
}

impl ModelStats {
    pub fn new(models: ModelsConfig) -> Self {
        Self {
            models,
            ..Self::default()
        }
    }

    fn counters(&self, class: ModelClass) -> &ClassCounters {
        match class {
            ModelClass::Lightweight => &self.lightweight,
            ModelClass::Heavyweight => &self.heavyweight,
        }
    }

    /// Record one model call and how long it took.
    ///
    /// Failed calls are counted but their latency is not, so timeouts do not
    /// skew the average.
    pub fn record(&self, class: ModelClass, latency: Duration, success: bool) {
        let c = self.counters(class);
        c.requests.fetch_add(1, Ordering::Relaxed);
        if success {
            c.successes.fetch_add(1, Ordering::Relaxed);
            let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
            c.success_latency_micros.fetch_add(micros, Ordering::Relaxed);
        } else {
            c.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a request answered with a canned reply.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters into a report.
    pub fn report(&self) -> PerformanceReport {
        let light = self.class_report(ModelClass::Lightweight);
        let heavy = self.class_report(ModelClass::Heavyweight);
        let total = light.requests + heavy.requests;

        let classes = [light, heavy]
            .into_iter()
            .map(|mut r| {
                r.traffic_share = ratio(r.requests, total);
                r
            })
            .collect();

        PerformanceReport {
            total_requests: total,
            fallback_count: self.fallbacks.load(Ordering::Relaxed),
            classes,
        }
    }

    fn class_report(&self, class: ModelClass) -> ClassReport {
        let c = self.counters(class);
        let requests = c.requests.load(Ordering::Relaxed);
        let successes = c.successes.load(Ordering::Relaxed);
        let latency_micros = c.success_latency_micros.load(Ordering::Relaxed);
        ClassReport {
            class,
            model: self.models.name_for(class).to_string(),
            requests,
            successes,
            failures: c.failures.load(Ordering::Relaxed),
            success_rate: ratio(successes, requests),
            avg_latency_ms: if successes == 0 {
                0.0
            } else {
                latency_micros as f64 / successes as f64 / 1000.0
            },
            traffic_share: 0.0,
        }
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Serializable performance summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    /// Model calls across both classes (alternate attempts included).
    pub total_requests: u64,
    /// Requests answered with a canned reply.
    pub fallback_count: u64,
    pub classes: Vec<ClassReport>,
}

/// Statistics for one model class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    pub class: ModelClass,
    pub model: String,
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
    /// Successes over requests, 0.0 to 1.0.
    pub success_rate: f64,
    /// Mean latency of successful calls.
    pub avg_latency_ms: f64,
    /// This class's share of all model calls, 0.0 to 1.0.
    pub traffic_share: f64,
}

impl std::fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "requests: {} (fallbacks: {})", self.total_requests, self.fallback_count)?;
        for c in &self.classes {
            writeln!(
                f,
                "  {:<12} {:<16} {:>5} req  {:>5.1}% ok  {:>8.1} ms avg  {:>5.1}% of traffic",
                c.class.to_string(),
                c.model,
                c.requests,
                c.success_rate * 100.0,
                c.avg_latency_ms,
                c.traffic_share * 100.0
            )?;
        }
        Ok(())
    }
}
