//! Room-advance call statistics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters maintained by the ledger worker.
///
/// Uses atomics for lock-free access from any handle.
#[derive(Debug, Default)]
pub struct LedgerMetrics {
    submitted: AtomicU64,
    confirmed: AtomicU64,
    failed: AtomicU64,
    /// Confirmations established by re-reading after an ambiguous failure
    reconciled: AtomicU64,
    total_call_time_nanos: AtomicU64,
}

impl LedgerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_confirmed(&self, elapsed: Duration, reconciled: bool) {
        self.confirmed.fetch_add(1, Ordering::Relaxed);
        if reconciled {
            self.reconciled.fetch_add(1, Ordering::Relaxed);
        }
        self.record_elapsed(elapsed);
    }

    pub(crate) fn record_failed(&self, elapsed: Duration) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        self.record_elapsed(elapsed);
    }

    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    pub fn confirmed(&self) -> u64 {
        self.confirmed.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn reconciled(&self) -> u64 {
        self.reconciled.load(Ordering::Relaxed)
    }

    /// Mean duration of completed calls, reconciliation reads included.
    pub fn average_call_time(&self) -> Option<Duration> {
        let completed = self.confirmed() + self.failed();
        if completed == 0 {
            return None;
        }
        let total = self.total_call_time_nanos.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total / completed))
    }

    fn record_elapsed(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.total_call_time_nanos
            .fetch_add(nanos, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_covers_confirmed_and_failed_calls() {
        let metrics = LedgerMetrics::new();
        assert_eq!(metrics.average_call_time(), None);

        metrics.record_submitted();
        metrics.record_confirmed(Duration::from_millis(100), false);
        metrics.record_submitted();
        metrics.record_failed(Duration::from_millis(300));
        metrics.record_confirmed(Duration::from_millis(200), true);

        assert_eq!(metrics.submitted(), 2);
        assert_eq!(metrics.confirmed(), 2);
        assert_eq!(metrics.failed(), 1);
        assert_eq!(metrics.reconciled(), 1);
        assert_eq!(metrics.average_call_time(), Some(Duration::from_millis(200)));
    }
}
