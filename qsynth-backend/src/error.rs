//! Error types for transpilation

use qsynth_core::QuantumError;
use thiserror::Error;

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors that can occur during transpilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Connectivity graph has no route between two qubits
    #[error("No path between qubits {from} and {to} in connectivity graph")]
    NoPath { from: usize, to: usize },

    /// Gate or circuit construction failed
    #[error(transparent)]
    Core(#[from] QuantumError),
}
