/*!
 * FIFO Stress Harness
 *
 * Runs producer and consumer threads against one shared queue, toggles
 * the lock gate mid-run, and verifies that no element was lost or
 * duplicated.
 *
 * Environment variables:
 * - FIFO_STRESS_PRODUCERS (default: 4)
 * - FIFO_STRESS_CONSUMERS (default: 4)
 * - FIFO_STRESS_ITEMS: items per producer (default: 10000)
 */

use concurrent_fifo::monitoring::span_operation;
use concurrent_fifo::{init_tracing, ConcurrentFifoQueue, QueueError};
use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use tracing::{info, warn};

fn env_usize(name: &str, default: usize) -> usize {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, default, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let producers = env_usize("FIFO_STRESS_PRODUCERS", 4);
    let consumers = env_usize("FIFO_STRESS_CONSUMERS", 4);
    let items = env_usize("FIFO_STRESS_ITEMS", 10_000);
    info!(producers, consumers, items, "Starting FIFO stress run");

    let queue: ConcurrentFifoQueue<u64> = ConcurrentFifoQueue::with_capacity(items);
    let producers_done = AtomicBool::new(false);
    let consumed = AtomicU64::new(0);
    let locked_retries = AtomicU64::new(0);

    let span = span_operation("stress");
    thread::scope(|s| {
        let producer_handles: Vec<_> = (0..producers)
            .map(|p| {
                let queue = &queue;
                let locked_retries = &locked_retries;
                s.spawn(move || {
                    for i in 0..items {
                        let value = (p * items + i) as u64;
                        // Retry through gate toggles; nothing else can fail
                        while let Err(QueueError::Locked) = queue.enqueue(value) {
                            locked_retries.fetch_add(1, Ordering::Relaxed);
                            thread::yield_now();
                        }
                    }
                })
            })
            .collect();

        for _ in 0..consumers {
            let queue = &queue;
            let producers_done = &producers_done;
            let consumed = &consumed;
            s.spawn(move || loop {
                match queue.dequeue() {
                    Ok(_) => {
                        consumed.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(QueueError::Empty) if producers_done.load(Ordering::Acquire) => break,
                    Err(_) => thread::yield_now(),
                }
            });
        }

        queue.lock();
        info!(len = queue.len(), "Gate locked mid-run");
        thread::yield_now();
        queue.unlock();
        info!("Gate unlocked");

        for handle in producer_handles {
            if handle.join().is_err() {
                warn!("Producer thread panicked");
            }
        }
        producers_done.store(true, Ordering::Release);
    });

    let expected = (producers * items) as u64;
    let consumed = consumed.load(Ordering::Relaxed);
    let remaining = queue.len() as u64;
    let stats = queue.stats();

    let ok = consumed + remaining == expected;
    let elapsed_ms = span.finish(consumed, if ok { "ok" } else { "mismatch" });
    info!(
        expected,
        consumed,
        remaining,
        locked_retries = locked_retries.load(Ordering::Relaxed),
        rejected_empty = stats.rejected_empty,
        elapsed_ms = elapsed_ms as u64,
        "Stress run finished"
    );

    if !ok {
        return Err(format!(
            "element count mismatch: expected {}, consumed {} + remaining {}",
            expected, consumed, remaining
        )
        .into());
    }

    Ok(())
}
