/*!
 * Queue Traits
 * Contract shared by concurrent queue implementations
 */

use crate::errors::QueueResult;

/// Thread-safe FIFO queue with indexed access and a lock gate
///
/// All methods take `&self`; implementations synchronize internally.
pub trait ConcurrentQueue<T>: Send + Sync {
    /// Append at the tail
    fn enqueue(&self, value: T) -> QueueResult<()>;

    /// Remove and return the head
    fn dequeue(&self) -> QueueResult<T>;

    /// Element at `index` without removing it
    fn get(&self, index: usize) -> QueueResult<T>;

    /// Remove the element at `index`
    fn remove(&self, index: usize) -> QueueResult<()>;

    /// Element count (ignores the gate)
    fn len(&self) -> usize;

    /// Allocated slots (ignores the gate)
    fn capacity(&self) -> usize;

    fn lock(&self);

    fn unlock(&self);

    fn is_locked(&self) -> bool;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
