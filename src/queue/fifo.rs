/*!
 * FIFO Queue
 * Concurrent first-in-first-out queue with indexed access and a lock gate
 */

use super::config::{GateMode, QueueConfig};
use super::gate::LockGate;
use super::stats::{AtomicQueueStats, QueueStatsSnapshot};
use super::traits::ConcurrentQueue;
use crate::errors::{QueueError, QueueResult};
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::fmt;
use tracing::trace;

/// Thread-safe, unbounded FIFO queue
///
/// Two independent readers-writer domains:
///
/// - **Sequence**: `enqueue`, `dequeue`, `remove` take it exclusively;
///   `get`, `len`, `capacity` take it shared.
/// - **Gate**: `lock`/`unlock` take it exclusively; `is_locked` and the
///   gate check of every sequence operation take it shared.
///
/// The gate lock is only ever held for a single flag read or write. In
/// strict mode that read happens inside the sequence critical section, so
/// the order is sequence, then gate; `lock` and `unlock` never touch the
/// sequence and never wait for sequence operations.
///
/// # Example
///
/// ```
/// use concurrent_fifo::{ConcurrentFifoQueue, QueueError};
///
/// let queue = ConcurrentFifoQueue::new();
/// queue.enqueue("a").unwrap();
/// queue.enqueue("b").unwrap();
///
/// queue.lock();
/// assert_eq!(queue.dequeue(), Err(QueueError::Locked));
/// assert_eq!(queue.len(), 2);
///
/// queue.unlock();
/// assert_eq!(queue.dequeue(), Ok("a"));
/// ```
pub struct ConcurrentFifoQueue<T> {
    items: RwLock<VecDeque<T>>,
    gate: LockGate,
    stats: AtomicQueueStats,
    config: QueueConfig,
}

impl<T> ConcurrentFifoQueue<T> {
    /// Empty, unlocked queue with the default (strict) configuration
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(QueueConfig::default().with_initial_capacity(capacity))
    }

    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            items: RwLock::new(VecDeque::with_capacity(config.initial_capacity)),
            gate: LockGate::new(),
            stats: AtomicQueueStats::new(),
            config,
        }
    }

    #[inline]
    fn check_gate(&self) -> QueueResult<()> {
        if self.gate.is_locked() {
            self.stats.inc_rejected_locked();
            return Err(QueueError::Locked);
        }
        Ok(())
    }

    /// Gate check ahead of the sequence lock (advisory mode only)
    #[inline]
    fn check_gate_before(&self) -> QueueResult<()> {
        match self.config.gate_mode {
            GateMode::Advisory => self.check_gate(),
            GateMode::Strict => Ok(()),
        }
    }

    /// Gate check with the sequence lock held (strict mode only)
    #[inline]
    fn check_gate_within(&self) -> QueueResult<()> {
        match self.config.gate_mode {
            GateMode::Strict => self.check_gate(),
            GateMode::Advisory => Ok(()),
        }
    }

    #[inline]
    fn out_of_bounds(&self, index: usize, len: usize) -> QueueError {
        self.stats.inc_rejected_out_of_bounds();
        QueueError::IndexOutOfBounds { index, len }
    }

    /// Append `value` at the tail
    pub fn enqueue(&self, value: T) -> QueueResult<()> {
        self.check_gate_before()?;

        let mut items = self.items.write();
        self.check_gate_within()?;
        items.push_back(value);
        self.stats.add_enqueued(1);
        Ok(())
    }

    /// Append a batch under a single exclusive acquisition
    ///
    /// The batch is collected before any lock is taken, then lands
    /// contiguously: no concurrent enqueue interleaves with it. A locked
    /// queue rejects the whole batch.
    ///
    /// Returns the number of elements appended.
    pub fn try_extend<I>(&self, values: I) -> QueueResult<usize>
    where
        I: IntoIterator<Item = T>,
    {
        let mut batch: VecDeque<T> = values.into_iter().collect();
        let appended = batch.len();

        self.check_gate_before()?;

        let mut items = self.items.write();
        self.check_gate_within()?;
        items.append(&mut batch);
        self.stats.add_enqueued(appended as u64);
        drop(items);

        trace!(appended, "Batch enqueued");
        Ok(appended)
    }

    /// Remove and return the head element
    ///
    /// Never waits: an empty queue yields `QueueError::Empty` immediately.
    pub fn dequeue(&self) -> QueueResult<T> {
        self.check_gate_before()?;

        let mut items = self.items.write();
        self.check_gate_within()?;
        match items.pop_front() {
            Some(value) => {
                self.stats.inc_dequeued();
                Ok(value)
            }
            None => {
                self.stats.inc_rejected_empty();
                Err(QueueError::Empty)
            }
        }
    }

    /// Remove the element at `index` and return it
    ///
    /// Later elements shift one position toward the head.
    pub fn remove_at(&self, index: usize) -> QueueResult<T> {
        self.check_gate_before()?;

        let mut items = self.items.write();
        self.check_gate_within()?;
        let len = items.len();
        match items.remove(index) {
            Some(value) => {
                self.stats.inc_removed();
                Ok(value)
            }
            None => Err(self.out_of_bounds(index, len)),
        }
    }

    /// Remove the element at `index`, discarding it
    pub fn remove(&self, index: usize) -> QueueResult<()> {
        self.remove_at(index).map(drop)
    }

    /// Run `f` on the element at `index` under shared access
    ///
    /// For element types that are not `Clone`. `f` must not call back into
    /// this queue: a writer queued behind the held read lock would deadlock it.
    pub fn peek_with<F, R>(&self, index: usize, f: F) -> QueueResult<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.check_gate_before()?;

        let items = self.items.read();
        self.check_gate_within()?;
        match items.get(index) {
            Some(value) => Ok(f(value)),
            None => Err(self.out_of_bounds(index, items.len())),
        }
    }

    /// Current element count, readable while locked
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Allocated slots, readable while locked
    pub fn capacity(&self) -> usize {
        self.items.read().capacity()
    }

    /// Set the gate; later operations fail with `QueueError::Locked`
    ///
    /// Never waits for or cancels operations already past their gate
    /// check. In strict mode every operation that has not yet entered the
    /// sequence critical section when this returns is rejected.
    pub fn lock(&self) {
        self.gate.lock();
    }

    pub fn unlock(&self) {
        self.gate.unlock();
    }

    pub fn is_locked(&self) -> bool {
        self.gate.is_locked()
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn stats(&self) -> QueueStatsSnapshot {
        self.stats.snapshot()
    }
}

impl<T: Clone> ConcurrentFifoQueue<T> {
    /// Clone of the element at `index`; the queue is unchanged
    pub fn get(&self, index: usize) -> QueueResult<T> {
        self.peek_with(index, T::clone)
    }
}

impl<T> Default for ConcurrentFifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ConcurrentFifoQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: VecDeque<T> = iter.into_iter().collect();
        let stats = AtomicQueueStats::new();
        stats.add_enqueued(items.len() as u64);

        Self {
            items: RwLock::new(items),
            gate: LockGate::new(),
            stats,
            config: QueueConfig::default(),
        }
    }
}

impl<T> fmt::Debug for ConcurrentFifoQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentFifoQueue")
            .field("len", &self.len())
            .field("locked", &self.is_locked())
            .field("gate_mode", &self.config.gate_mode)
            .finish()
    }
}

impl<T: Clone + Send + Sync> ConcurrentQueue<T> for ConcurrentFifoQueue<T> {
    fn enqueue(&self, value: T) -> QueueResult<()> {
        ConcurrentFifoQueue::enqueue(self, value)
    }

    fn dequeue(&self) -> QueueResult<T> {
        ConcurrentFifoQueue::dequeue(self)
    }

    fn get(&self, index: usize) -> QueueResult<T> {
        ConcurrentFifoQueue::get(self, index)
    }

    fn remove(&self, index: usize) -> QueueResult<()> {
        ConcurrentFifoQueue::remove(self, index)
    }

    fn len(&self) -> usize {
        ConcurrentFifoQueue::len(self)
    }

    fn capacity(&self) -> usize {
        ConcurrentFifoQueue::capacity(self)
    }

    fn lock(&self) {
        ConcurrentFifoQueue::lock(self)
    }

    fn unlock(&self) {
        ConcurrentFifoQueue::unlock(self)
    }

    fn is_locked(&self) -> bool {
        ConcurrentFifoQueue::is_locked(self)
    }

    fn is_empty(&self) -> bool {
        ConcurrentFifoQueue::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_counted() {
        let queue: ConcurrentFifoQueue<u32> = ConcurrentFifoQueue::new();
        assert_eq!(queue.dequeue(), Err(QueueError::Empty));
        assert_eq!(
            queue.get(0),
            Err(QueueError::IndexOutOfBounds { index: 0, len: 0 })
        );

        queue.lock();
        assert_eq!(queue.enqueue(1), Err(QueueError::Locked));

        let stats = queue.stats();
        assert_eq!(stats.rejected_empty, 1);
        assert_eq!(stats.rejected_out_of_bounds, 1);
        assert_eq!(stats.rejected_locked, 1);
        assert_eq!(stats.enqueued, 0);
    }

    #[test]
    fn test_advisory_gate_still_rejects_when_set() {
        let queue = ConcurrentFifoQueue::with_config(QueueConfig::advisory());
        queue.enqueue(1).unwrap();
        queue.lock();
        assert_eq!(queue.dequeue(), Err(QueueError::Locked));
        assert_eq!(queue.remove(0), Err(QueueError::Locked));
        queue.unlock();
        assert_eq!(queue.dequeue(), Ok(1));
    }

    #[test]
    fn test_from_iter_counts_as_enqueued() {
        let queue: ConcurrentFifoQueue<_> = (0..4).collect();
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.stats().resident(), 4);
        assert!(!queue.is_locked());
    }

    #[test]
    fn test_debug_hides_contents() {
        let queue = ConcurrentFifoQueue::new();
        queue.enqueue("secret").unwrap();
        let rendered = format!("{:?}", queue);
        assert!(rendered.contains("len: 1"));
        assert!(!rendered.contains("secret"));
    }
}
