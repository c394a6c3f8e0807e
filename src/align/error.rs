use thiserror::Error;

/// Failures reported by the alignment engine before any DP work is done.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
}

impl AlignError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
