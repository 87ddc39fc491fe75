use std::fmt;

/// Result type for minerva operations
pub type Result<T> = std::result::Result<T, MinervaError>;

/// Main error type for the minerva library
#[derive(Debug, Clone, PartialEq)]
pub enum MinervaError {
    /// Matrix or vector dimensions disagree with declared sizes
    ShapeMismatch {
        expected: String,
        actual: String,
    },

    /// Invalid parameter value (negative lambda, zero batch size, ...)
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// Adjacent layers violate the size contract at assembly time
    ArchitectureMismatch {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    /// A dense layer was used before its weights were initialized
    UninitializedLayer,
}

impl fmt::Display for MinervaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinervaError::ShapeMismatch { expected, actual } => {
                write!(f, "Shape mismatch: expected {}, got {}", expected, actual)
            }
            MinervaError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            MinervaError::ArchitectureMismatch { layer, expected, actual } => {
                write!(
                    f,
                    "Architecture mismatch at layer {}: expected input size {}, got {}",
                    layer, expected, actual
                )
            }
            MinervaError::UninitializedLayer => {
                write!(f, "Layer used before its weights were initialized")
            }
        }
    }
}

impl std::error::Error for MinervaError {}

// Helper functions for common error patterns
impl MinervaError {
    pub fn shape_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        MinervaError::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        MinervaError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
