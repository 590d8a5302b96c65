/*!
 * Lock Gate
 * Boolean gate in its own readers-writer domain, separate from queue storage
 */

use parking_lot::RwLock;
use tracing::debug;

/// Gate that makes queue operations fail fast while set
#[derive(Debug, Default)]
pub struct LockGate {
    locked: RwLock<bool>,
}

impl LockGate {
    pub fn new() -> Self {
        Self {
            locked: RwLock::new(false),
        }
    }

    /// Set the gate. Returns true if it was previously open.
    pub fn lock(&self) -> bool {
        let mut locked = self.locked.write();
        let changed = !*locked;
        *locked = true;
        if changed {
            debug!("Queue gate locked");
        }
        changed
    }

    /// Clear the gate. Returns true if it was previously set.
    pub fn unlock(&self) -> bool {
        let mut locked = self.locked.write();
        let changed = *locked;
        *locked = false;
        if changed {
            debug!("Queue gate unlocked");
        }
        changed
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        *self.locked.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_transitions() {
        let gate = LockGate::new();
        assert!(!gate.is_locked());

        assert!(gate.lock());
        assert!(!gate.lock());
        assert!(gate.is_locked());

        assert!(gate.unlock());
        assert!(!gate.unlock());
        assert!(!gate.is_locked());
    }

    #[test]
    fn test_concurrent_toggles_settle() {
        let gate = Arc::new(LockGate::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        gate.lock();
                        let _ = gate.is_locked();
                        gate.unlock();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(!gate.is_locked());
        assert!(gate.lock());
    }
}
