//! Error types for the conversion pipeline.

use thiserror::Error;

/// Result type for pipeline operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while converting audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The container handed in is malformed or unsupported.
    #[error("invalid container: {message}")]
    InvalidContainer {
        /// Error message.
        message: String,
    },

    /// Format metadata is missing or describes something we cannot decode.
    #[error("unreadable format: {message}")]
    UnreadableFormat {
        /// Error message.
        message: String,
    },

    /// The forward pipeline hit an invariant violation.
    #[error("encode failed at stage '{stage}': {message}")]
    EncodeFailure {
        /// Stage that failed.
        stage: String,
        /// Error message.
        message: String,
    },

    /// The reverse pipeline hit an invariant violation.
    #[error("decode failed at stage '{stage}': {message}")]
    DecodeFailure {
        /// Stage that failed.
        stage: String,
        /// Error message.
        message: String,
    },

    /// An all-zero buffer reached a stage that needs signal energy.
    #[error("degenerate (silent) signal at stage '{stage}'")]
    DegenerateSignal {
        /// Stage that rejected the buffer.
        stage: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid container error.
    pub fn invalid_container(message: impl Into<String>) -> Self {
        Self::InvalidContainer {
            message: message.into(),
        }
    }

    /// Creates an unreadable format error.
    pub fn unreadable_format(message: impl Into<String>) -> Self {
        Self::UnreadableFormat {
            message: message.into(),
        }
    }

    /// Creates an encode failure for a pipeline stage.
    pub fn encode_failure(stage: impl ToString, message: impl Into<String>) -> Self {
        Self::EncodeFailure {
            stage: stage.to_string(),
            message: message.into(),
        }
    }

    /// Creates a decode failure for a pipeline stage.
    pub fn decode_failure(stage: impl ToString, message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            stage: stage.to_string(),
            message: message.into(),
        }
    }

    /// Creates a degenerate signal error for a pipeline stage.
    pub fn degenerate(stage: impl ToString) -> Self {
        Self::DegenerateSignal {
            stage: stage.to_string(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidContainer { .. } => "ULAW_001",
            AudioError::UnreadableFormat { .. } => "ULAW_002",
            AudioError::EncodeFailure { .. } => "ULAW_003",
            AudioError::DecodeFailure { .. } => "ULAW_004",
            AudioError::DegenerateSignal { .. } => "ULAW_005",
            AudioError::InvalidParameter { .. } => "ULAW_006",
        }
    }

    /// Broad category, used to group errors in reports.
    pub fn category(&self) -> &'static str {
        match self {
            AudioError::InvalidContainer { .. } | AudioError::UnreadableFormat { .. } => {
                "container"
            }
            AudioError::InvalidParameter { .. } => "config",
            _ => "pipeline",
        }
    }
}
