/*!
 * Queue Configuration
 *
 * Construction-time options for gate enforcement and preallocation
 */

use serde::{Deserialize, Serialize};

/// How strictly the lock gate is enforced against in-flight operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// Gate read inside the sequence critical section.
    ///
    /// `lock()` never waits. Once it returns, every operation that has not
    /// yet entered its critical section is rejected.
    #[default]
    Strict,
    /// Gate checked, then released before the sequence lock is taken.
    ///
    /// A `lock()` racing an operation that already passed its check does
    /// not stop that operation.
    Advisory,
}

/// Queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Gate enforcement mode
    pub gate_mode: GateMode,
    /// Slots reserved up front (not a bound)
    pub initial_capacity: usize,
}

impl QueueConfig {
    /// Strict gate, no preallocation
    pub const fn strict() -> Self {
        Self {
            gate_mode: GateMode::Strict,
            initial_capacity: 0,
        }
    }

    /// Advisory gate, no preallocation
    pub const fn advisory() -> Self {
        Self {
            gate_mode: GateMode::Advisory,
            initial_capacity: 0,
        }
    }

    pub const fn with_gate_mode(mut self, gate_mode: GateMode) -> Self {
        self.gate_mode = gate_mode;
        self
    }

    pub const fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}
