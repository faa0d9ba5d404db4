//! Error types for state vector operations

use qsynth_core::QuantumError;
use thiserror::Error;

/// Errors that can occur during state vector operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Invalid qubit index
    #[error("Invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Amplitude count is not a power of two
    #[error("Invalid state dimension {dimension}, expected power of 2")]
    InvalidDimension { dimension: usize },

    /// Two states of different widths were combined
    #[error("Dimension mismatch: expected {expected} qubits, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Circuit could not be simulated
    #[error(transparent)]
    Circuit(#[from] QuantumError),
}

/// Result type for state vector operations
pub type Result<T> = std::result::Result<T, StateError>;
