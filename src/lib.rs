/*!
 * Concurrent FIFO Library
 * Thread-safe FIFO queue with indexed access and a lock gate
 */

pub mod errors;
pub mod monitoring;
pub mod queue;

// Re-exports
pub use errors::*;
pub use monitoring::init_tracing;
pub use queue::{
    ConcurrentFifoQueue, ConcurrentQueue, GateMode, QueueConfig, QueueStatsSnapshot,
};
