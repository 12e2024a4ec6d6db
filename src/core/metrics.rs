//! Router metrics for observability
//!
//! Counters describing where messages were routed, how many caller threads have been
//! registered, and how debug gating and debug file output behaved.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the caller-scoped router
///
/// # Example
///
/// ```
/// use plugin_logger::RouterMetrics;
///
/// let metrics = RouterMetrics::new();
/// metrics.record_main_routed();
/// metrics.record_debug_suppressed();
///
/// assert_eq!(metrics.main_routed(), 1);
/// assert_eq!(metrics.debug_suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct RouterMetrics {
    /// Messages forwarded straight to the host sink from the main thread
    main_routed: AtomicU64,

    /// Messages forwarded through a per-caller sink
    caller_routed: AtomicU64,

    /// Per-caller sinks created
    callers_registered: AtomicU64,

    /// Debug messages that passed the gate
    debug_emitted: AtomicU64,

    /// Debug messages rejected by the gate
    debug_suppressed: AtomicU64,

    /// Debug files that received content; gated-out calls leave an empty file uncounted
    files_written: AtomicU64,

    /// Debug file operations that failed
    file_failures: AtomicU64,
}

impl RouterMetrics {
    pub const fn new() -> Self {
        Self {
            main_routed: AtomicU64::new(0),
            caller_routed: AtomicU64::new(0),
            callers_registered: AtomicU64::new(0),
            debug_emitted: AtomicU64::new(0),
            debug_suppressed: AtomicU64::new(0),
            files_written: AtomicU64::new(0),
            file_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn main_routed(&self) -> u64 {
        self.main_routed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn caller_routed(&self) -> u64 {
        self.caller_routed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn callers_registered(&self) -> u64 {
        self.callers_registered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn debug_emitted(&self) -> u64 {
        self.debug_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn debug_suppressed(&self) -> u64 {
        self.debug_suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn files_written(&self) -> u64 {
        self.files_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn file_failures(&self) -> u64 {
        self.file_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_main_routed(&self) -> u64 {
        self.main_routed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_caller_routed(&self) -> u64 {
        self.caller_routed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_caller_registered(&self) -> u64 {
        self.callers_registered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_debug_emitted(&self) -> u64 {
        self.debug_emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_debug_suppressed(&self) -> u64 {
        self.debug_suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_written(&self) -> u64 {
        self.files_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_failure(&self) -> u64 {
        self.file_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of gated debug messages that were suppressed, as a percentage (0.0 - 100.0)
    pub fn suppression_rate(&self) -> f64 {
        let suppressed = self.debug_suppressed() as f64;
        let total = self.debug_emitted() as f64 + suppressed;
        if total == 0.0 {
            0.0
        } else {
            (suppressed / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.main_routed.store(0, Ordering::Relaxed);
        self.caller_routed.store(0, Ordering::Relaxed);
        self.callers_registered.store(0, Ordering::Relaxed);
        self.debug_emitted.store(0, Ordering::Relaxed);
        self.debug_suppressed.store(0, Ordering::Relaxed);
        self.files_written.store(0, Ordering::Relaxed);
        self.file_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for RouterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RouterMetrics {
    /// Snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            main_routed: AtomicU64::new(self.main_routed()),
            caller_routed: AtomicU64::new(self.caller_routed()),
            callers_registered: AtomicU64::new(self.callers_registered()),
            debug_emitted: AtomicU64::new(self.debug_emitted()),
            debug_suppressed: AtomicU64::new(self.debug_suppressed()),
            files_written: AtomicU64::new(self.files_written()),
            file_failures: AtomicU64::new(self.file_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.main_routed(), 0);
        assert_eq!(metrics.caller_routed(), 0);
        assert_eq!(metrics.callers_registered(), 0);
        assert_eq!(metrics.files_written(), 0);
        assert_eq!(metrics.file_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.record_caller_registered(), 0);
        assert_eq!(metrics.record_caller_registered(), 1);
        assert_eq!(metrics.callers_registered(), 2);
    }

    #[test]
    fn test_suppression_rate() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.suppression_rate(), 0.0);

        for _ in 0..3 {
            metrics.record_debug_emitted();
        }
        metrics.record_debug_suppressed();

        let rate = metrics.suppression_rate();
        assert!((24.9..=25.1).contains(&rate), "Suppression rate was {}", rate);
    }

    #[test]
    fn test_snapshot_and_reset() {
        let metrics = RouterMetrics::new();
        metrics.record_main_routed();
        metrics.record_file_failure();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(snapshot.main_routed(), 1);
        assert_eq!(snapshot.file_failures(), 1);
        assert_eq!(metrics.main_routed(), 0);
        assert_eq!(metrics.file_failures(), 0);
    }
}
