//! Error types for bloques operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;
use std::time::Duration;

/// Main error type for bloques operations.
///
/// Covers operand shape mismatches and the two failure modes of the
/// parallel multiplication path (deadline expiry and worker loss).
///
/// # Examples
///
/// ```
/// use bloques::error::BloquesError;
///
/// let err = BloquesError::ShapeMismatch {
///     expected: "4x4".to_string(),
///     actual: "4x2".to_string(),
/// };
/// assert!(err.to_string().contains("shape mismatch"));
/// ```
#[derive(Debug)]
pub enum BloquesError {
    /// Operand dimensions incompatible with the requested operation.
    ShapeMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// The parallel multiplication did not finish within its deadline.
    Timeout {
        /// Deadline that elapsed
        deadline: Duration,
    },

    /// The worker pool was lost before all tasks completed.
    Cancelled {
        /// What went missing
        reason: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for BloquesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BloquesError::ShapeMismatch { expected, actual } => {
                write!(f, "Matrix shape mismatch: expected {expected}, got {actual}")
            }
            BloquesError::Timeout { deadline } => {
                write!(
                    f,
                    "Parallel multiplication took too long: deadline {deadline:?} elapsed"
                )
            }
            BloquesError::Cancelled { reason } => {
                write!(f, "Parallel multiplication cancelled: {reason}")
            }
            BloquesError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BloquesError {}

impl From<&str> for BloquesError {
    fn from(msg: &str) -> Self {
        BloquesError::Other(msg.to_string())
    }
}

impl From<String> for BloquesError {
    fn from(msg: String) -> Self {
        BloquesError::Other(msg)
    }
}

impl BloquesError {
    /// Create a shape mismatch error from two (rows, cols) pairs.
    #[must_use]
    pub fn shape_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::ShapeMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Create a shape mismatch error with a free-form expectation.
    #[must_use]
    pub fn shape_constraint(constraint: &str, actual: (usize, usize)) -> Self {
        Self::ShapeMismatch {
            expected: constraint.to_string(),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for BloquesError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<BloquesError> for &str {
    fn eq(&self, other: &BloquesError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, BloquesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = BloquesError::shape_mismatch((4, 4), (4, 2));
        assert!(err.to_string().contains("shape mismatch"));
        assert!(err.to_string().contains("4x4"));
        assert!(err.to_string().contains("4x2"));
    }

    #[test]
    fn test_shape_constraint_display() {
        let err = BloquesError::shape_constraint("square matrix", (3, 5));
        assert!(err.to_string().contains("square matrix"));
        assert!(err.to_string().contains("3x5"));
    }

    #[test]
    fn test_timeout_display() {
        let err = BloquesError::Timeout {
            deadline: Duration::from_secs(100),
        };
        let msg = err.to_string();
        assert!(msg.contains("took too long"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_cancelled_display() {
        let err = BloquesError::Cancelled {
            reason: "worker pool disconnected".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cancelled"));
        assert!(msg.contains("worker pool disconnected"));
    }

    #[test]
    fn test_from_str() {
        let err: BloquesError = "test error".into();
        assert!(matches!(err, BloquesError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_string() {
        let err: BloquesError = "test error".to_string().into();
        assert!(matches!(err, BloquesError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_error_eq_str() {
        let err = BloquesError::Other("test error".to_string());
        assert!(err == "test error");
        assert!("test error" == err);
    }

    #[test]
    fn test_error_debug_impl() {
        let err = BloquesError::Other("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Other"));
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<BloquesError>();
        assert_sync::<BloquesError>();
    }
}
