/*!
 * Lock-Free Queue Statistics
 * Atomic counters updated alongside queue operations
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the queue counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatsSnapshot {
    pub enqueued: u64,
    pub dequeued: u64,
    pub removed: u64,
    pub rejected_locked: u64,
    pub rejected_empty: u64,
    pub rejected_out_of_bounds: u64,
}

impl QueueStatsSnapshot {
    /// Elements still queued, exact only while no operation is in flight
    ///
    /// Under concurrent load this may trail `len()`, but never underflows.
    pub fn resident(&self) -> u64 {
        self.enqueued
            .saturating_sub(self.dequeued)
            .saturating_sub(self.removed)
    }

    pub fn total_rejected(&self) -> u64 {
        self.rejected_locked + self.rejected_empty + self.rejected_out_of_bounds
    }
}

/// Atomic queue statistics
///
/// # Performance
/// - Cache-line aligned to keep counters off the lock words' lines
/// - Updated inside the sequence critical section
/// - Removal counters publish with `Release` and are loaded first with
///   `Acquire`, so a snapshot never shows more removals than enqueues
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct AtomicQueueStats {
    enqueued: AtomicU64,
    dequeued: AtomicU64,
    removed: AtomicU64,
    rejected_locked: AtomicU64,
    rejected_empty: AtomicU64,
    rejected_out_of_bounds: AtomicU64,
}

impl AtomicQueueStats {
    #[inline]
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            dequeued: AtomicU64::new(0),
            removed: AtomicU64::new(0),
            rejected_locked: AtomicU64::new(0),
            rejected_empty: AtomicU64::new(0),
            rejected_out_of_bounds: AtomicU64::new(0),
        }
    }

    #[inline(always)]
    pub fn add_enqueued(&self, count: u64) {
        self.enqueued.fetch_add(count, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_dequeued(&self) {
        self.dequeued.fetch_add(1, Ordering::Release);
    }

    #[inline(always)]
    pub fn inc_removed(&self) {
        self.removed.fetch_add(1, Ordering::Release);
    }

    #[inline(always)]
    pub fn inc_rejected_locked(&self) {
        self.rejected_locked.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_rejected_empty(&self) {
        self.rejected_empty.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_rejected_out_of_bounds(&self) {
        self.rejected_out_of_bounds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> QueueStatsSnapshot {
        // Removals before enqueues: each counted removal's enqueue is then visible
        let dequeued = self.dequeued.load(Ordering::Acquire);
        let removed = self.removed.load(Ordering::Acquire);
        let enqueued = self.enqueued.load(Ordering::Relaxed);

        QueueStatsSnapshot {
            enqueued,
            dequeued,
            removed,
            rejected_locked: self.rejected_locked.load(Ordering::Relaxed),
            rejected_empty: self.rejected_empty.load(Ordering::Relaxed),
            rejected_out_of_bounds: self.rejected_out_of_bounds.load(Ordering::Relaxed),
        }
    }
}
