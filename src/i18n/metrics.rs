//! Translation cache metrics.
//!
//! Counters are owned by each cache instance so independent caches (and
//! tests) do not share state.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Requests answered from a fresh cached tree
    cache_hits: AtomicUsize,

    /// Requests that found no usable tree (empty, expired or invalidated)
    cache_misses: AtomicUsize,

    /// Reads issued against the translation store
    store_reads: AtomicUsize,

    /// Store reads that failed
    store_failures: AtomicUsize,

    /// Accepted invalidation signals
    invalidations: AtomicUsize,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_read(&self) {
        self.store_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_failure(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn store_reads(&self) -> usize {
        self.store_reads.load(Ordering::Relaxed)
    }

    pub fn store_failures(&self) -> usize {
        self.store_failures.load(Ordering::Relaxed)
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total = hits + misses;
        let cache_hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            store_reads: self.store_reads(),
            store_failures: self.store_failures(),
            invalidations: self.invalidations(),
        }
    }
}

/// Snapshot of the cache counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub store_reads: usize,
    pub store_failures: usize,
    pub invalidations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = CacheMetrics::new();
        assert_eq!(metrics.cache_hits(), 0);
        assert_eq!(metrics.cache_misses(), 0);
        assert_eq!(metrics.store_reads(), 0);
        assert_eq!(metrics.store_failures(), 0);
        assert_eq!(metrics.invalidations(), 0);
    }

    #[test]
    fn test_record_each_counter() {
        let metrics = CacheMetrics::new();
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_miss();
        metrics.record_store_read();
        metrics.record_store_failure();
        metrics.record_invalidation();

        assert_eq!(metrics.cache_hits(), 2);
        assert_eq!(metrics.cache_misses(), 1);
        assert_eq!(metrics.store_reads(), 1);
        assert_eq!(metrics.store_failures(), 1);
        assert_eq!(metrics.invalidations(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = CacheMetrics::new().report();
        assert_eq!(report.cache_hit_rate, 0.0);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = CacheMetrics::new();
        for _ in 0..3 {
            metrics.record_cache_hit();
        }
        metrics.record_cache_miss();

        let report = metrics.report();
        assert_eq!(report.cache_hits, 3);
        assert_eq!(report.cache_misses, 1);
        assert!((report.cache_hit_rate - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(CacheMetrics::new().report()).unwrap();
        assert!(json.get("cache_hit_rate").is_some());
        assert!(json.get("invalidations").is_some());
    }
}
