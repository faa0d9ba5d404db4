//! Error types for problem encoding and circuit generation

use qsynth_core::QuantumError;
use qsynth_state::StateError;
use thiserror::Error;

/// Errors raised by the optimization layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptError {
    /// Operation requires an encoded problem
    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Circuit construction failed
    #[error(transparent)]
    Core(#[from] QuantumError),

    /// Sampling a generated circuit failed
    #[error(transparent)]
    State(#[from] StateError),
}

impl OptError {
    pub fn illegal_state(msg: impl Into<String>) -> Self {
        Self::IllegalState(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for optimization operations
pub type Result<T> = std::result::Result<T, OptError>;
