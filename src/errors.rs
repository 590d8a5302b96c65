/*!
 * Error Types
 * Queue error taxonomy with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Queue operation errors with serialization support
///
/// Every variant is recoverable: the queue stays valid and usable after
/// any of them is returned.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum QueueError {
    #[error("the queue is locked")]
    #[diagnostic(
        code(queue::locked),
        help("The lock gate is set. Call unlock() before mutating or inspecting the queue.")
    )]
    Locked,

    #[error("queue is empty")]
    #[diagnostic(
        code(queue::empty),
        help("Nothing to dequeue. Dequeue never waits for new elements.")
    )]
    Empty,

    #[error("index out of bounds: {index}")]
    #[diagnostic(
        code(queue::index_out_of_bounds),
        help("Valid indices are 0..len at the time of the call. The queue may have shrunk concurrently.")
    )]
    IndexOutOfBounds { index: usize, len: usize },
}

impl QueueError {
    /// True for the gate rejection, the only error that goes away on unlock
    #[inline]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(QueueError::Locked.to_string(), "the queue is locked");
        assert_eq!(QueueError::Empty.to_string(), "queue is empty");
        assert_eq!(
            QueueError::IndexOutOfBounds { index: 7, len: 3 }.to_string(),
            "index out of bounds: 7"
        );
    }

    #[test]
    fn test_diagnostic_codes() {
        let code = QueueError::Locked.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("queue::locked"));

        let err = QueueError::IndexOutOfBounds { index: 1, len: 0 };
        assert!(err.help().is_some());
        assert!(!err.is_locked());
    }
}
