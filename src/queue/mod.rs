/*!
 * Concurrent Queue
 *
 * Unbounded FIFO queue shared between producer and consumer threads.
 *
 * # Architecture
 *
 * Storage lives behind one readers-writer lock, the lock gate behind
 * another. The gate is either read inside each operation's critical
 * section (strict) or checked before it (advisory), selected through
 * `QueueConfig`. Setting the gate never waits for in-flight operations.
 */

mod config;
mod fifo;
mod gate;
mod stats;
mod traits;

pub use config::{GateMode, QueueConfig};
pub use fifo::ConcurrentFifoQueue;
pub use gate::LockGate;
pub use stats::{AtomicQueueStats, QueueStatsSnapshot};
pub use traits::ConcurrentQueue;
