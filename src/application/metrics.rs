//! Dispatch metrics for rate-limited handlers.
//!
//! Counts how many calls a debounced or throttled handler received and how
//! many actually reached the wrapped action.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking rate-limited dispatch.
///
/// Clones share the same counters, so one instance can be handed to several
/// wrappers to aggregate their activity.
#[derive(Debug, Clone)]
pub struct DispatchMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    calls_received: AtomicU64,
    calls_fired: AtomicU64,
    calls_suppressed: AtomicU64,
}

impl DispatchMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                calls_received: AtomicU64::new(0),
                calls_fired: AtomicU64::new(0),
                calls_suppressed: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn record_received(&self) {
        self.inner.calls_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fired(&self) {
        self.inner.calls_fired.fetch_add(1, Ordering::Relaxed);
    }

    /// A call was dropped by a throttle window or superseded in a debounce.
    pub(crate) fn record_suppressed(&self) {
        self.inner.calls_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    /// Total calls made to wrapped handlers.
    pub fn calls_received(&self) -> u64 {
        self.inner.calls_received.load(Ordering::Relaxed)
    }

    /// Calls that reached the wrapped action.
    pub fn calls_fired(&self) -> u64 {
        self.inner.calls_fired.load(Ordering::Relaxed)
    }

    /// Calls dropped or superseded.
    pub fn calls_suppressed(&self) -> u64 {
        self.inner.calls_suppressed.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls_received: self.calls_received(),
            calls_fired: self.calls_fired(),
            calls_suppressed: self.calls_suppressed(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inner.calls_received.store(0, Ordering::Relaxed);
        self.inner.calls_fired.store(0, Ordering::Relaxed);
        self.inner.calls_suppressed.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of dispatch metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub calls_received: u64,
    pub calls_fired: u64,
    pub calls_suppressed: u64,
}

impl MetricsSnapshot {
    /// Fraction of received calls that were suppressed (0.0 to 1.0).
    ///
    /// Returns 0.0 if no calls were received.
    pub fn suppression_rate(&self) -> f64 {
        if self.calls_received == 0 {
            0.0
        } else {
            self.calls_suppressed as f64 / self.calls_received as f64
        }
    }

    /// Calls received but neither fired nor suppressed yet.
    pub fn pending(&self) -> u64 {
        self.calls_received
            .saturating_sub(self.calls_fired)
            .saturating_sub(self.calls_suppressed)
    }
}
