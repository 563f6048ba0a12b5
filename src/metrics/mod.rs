//! Basic metrics instrumentation for the RPC dispatcher.
//!
//! Provides counters and duration tracking for dispatched calls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for dispatched calls.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of calls dispatched
    calls_total: Arc<AtomicU64>,

    /// Total number of calls answered with an error envelope
    errors_total: Arc<AtomicU64>,

    /// Total dispatch time in microseconds
    duration_total_us: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            calls_total: Arc::new(AtomicU64::new(0)),
            errors_total: Arc::new(AtomicU64::new(0)),
            duration_total_us: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a dispatched call with its duration.
    pub fn record_call(&self, duration: Duration) {
        self.calls_total.fetch_add(1, Ordering::Relaxed);
        self.duration_total_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record a call that produced an error envelope.
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total calls.
    pub fn calls_total(&self) -> u64 {
        self.calls_total.load(Ordering::Relaxed)
    }

    /// Get total error envelopes.
    pub fn errors_total(&self) -> u64 {
        self.errors_total.load(Ordering::Relaxed)
    }

    /// Get total dispatch time in microseconds.
    pub fn duration_total_us(&self) -> u64 {
        self.duration_total_us.load(Ordering::Relaxed)
    }

    /// Get average dispatch time in microseconds.
    pub fn duration_avg_us(&self) -> f64 {
        let total = self.duration_total_us.load(Ordering::Relaxed);
        let count = self.calls_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            calls_total: self.calls_total(),
            errors_total: self.errors_total(),
            duration_total_us: self.duration_total_us(),
            duration_avg_us: self.duration_avg_us(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub calls_total: u64,
    pub errors_total: u64,
    pub duration_total_us: u64,
    pub duration_avg_us: f64,
}

/// Helper for timing a single dispatched call.
pub struct CallTimer {
    start: Instant,
    metrics: Metrics,
}

impl CallTimer {
    /// Start timing a call.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_call(self.start.elapsed());
    }

    /// Complete the timing and record the call as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_call(self.start.elapsed());
        self.metrics.record_error();
    }
}
