//! Error types for estimar.
//!
//! All fallible operations return `Result<T, EstimarError>` instead of
//! panicking. Any failure aborts the whole estimation call; there is no
//! degraded or partial-result mode.

use thiserror::Error;

/// Result type alias for estimar operations.
pub type EstResult<T> = Result<T, EstimarError>;

/// Unified error type for all estimar operations.
#[derive(Debug, Error)]
pub enum EstimarError {
    // ===== Argument Errors =====
    /// Invalid argument supplied to the estimation pipeline.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// The integrand produced a non-finite value at a sampled point.
    ///
    /// Propagated immediately; no frames are emitted after the failing
    /// sample and no partial estimate is salvaged.
    #[error("integrand returned non-finite value at x = {x:.6e} (sample {index})")]
    FunctionEvaluation {
        /// 1-based index of the failing sample.
        index: usize,
        /// The sampled point at which evaluation failed.
        x: f64,
    },

    /// A frame sequence was requested for zero samples.
    #[error("empty frame sequence: sample count must be at least 1")]
    EmptySequence,

    // ===== Collaborator Errors =====
    /// Opaque failure from the rendering backend.
    ///
    /// Propagated to the caller without retry; sampling and estimation are
    /// deterministic-cost, idempotent-per-call operations with no
    /// transient-failure modes.
    #[error("rendering backend error: {message}")]
    Rendering {
        /// Backend-provided failure description.
        message: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl EstimarError {
    /// Create an invalid-argument error with a message.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an opaque rendering backend error.
    #[must_use]
    pub fn rendering(message: impl Into<String>) -> Self {
        Self::Rendering {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check whether this error aborted the pipeline mid-evaluation.
    #[must_use]
    pub const fn is_function_evaluation(&self) -> bool {
        matches!(self, Self::FunctionEvaluation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = EstimarError::invalid_argument("n must be positive");
        let msg = err.to_string();
        assert!(msg.contains("invalid argument"));
        assert!(msg.contains("n must be positive"));
    }

    #[test]
    fn test_function_evaluation_display() {
        let err = EstimarError::FunctionEvaluation { index: 7, x: 0.25 };
        let msg = err.to_string();
        assert!(msg.contains("non-finite"));
        assert!(msg.contains("sample 7"));
        assert!(err.is_function_evaluation());
    }

    #[test]
    fn test_empty_sequence_display() {
        let err = EstimarError::EmptySequence;
        let msg = err.to_string();
        assert!(msg.contains("at least 1"));
        assert!(!err.is_function_evaluation());
    }

    #[test]
    fn test_rendering_display() {
        let err = EstimarError::rendering("device lost");
        let msg = err.to_string();
        assert!(msg.contains("rendering backend error"));
        assert!(msg.contains("device lost"));
    }

    #[test]
    fn test_config_display() {
        let err = EstimarError::config("frames must be positive");
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("frames must be positive"));
    }

    #[test]
    fn test_serialization_display() {
        let err = EstimarError::serialization("bad frame");
        let msg = err.to_string();
        assert!(msg.contains("serialization error"));
        assert!(msg.contains("bad frame"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::other("disk gone");
        let err: EstimarError = io.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_debug() {
        let err = EstimarError::invalid_argument("test");
        let debug = format!("{err:?}");
        assert!(debug.contains("InvalidArgument"));
    }
}
