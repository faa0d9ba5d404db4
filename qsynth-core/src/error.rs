//! Error types for gate and circuit construction

use crate::QubitId;
use thiserror::Error;

/// Errors raised while building gates and circuits
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// Qubit index outside the circuit register
    #[error("Invalid qubit index {0}: circuit has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Classical bit index outside the classical register
    #[error("Invalid classical bit {0}: circuit has only {1} classical bits")]
    InvalidClassicalBit(usize, usize),

    /// Gate applied to the wrong number of qubits
    #[error("Gate '{gate}' requires {expected} qubits, but {actual} were provided")]
    InvalidQubitCount {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Same qubit listed twice in one gate
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(QubitId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl QuantumError {
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    pub fn invalid_qubit_count(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidQubitCount {
            gate: gate.into(),
            expected,
            actual,
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_qubit_message() {
        let msg = QuantumError::invalid_qubit(5, 3).to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_invalid_qubit_count_message() {
        let msg = QuantumError::invalid_qubit_count("toffoli", 3, 2).to_string();
        assert!(msg.contains("toffoli"));
        assert!(msg.contains("requires 3"));
    }

    #[test]
    fn test_duplicate_qubit_message() {
        let msg = QuantumError::DuplicateQubit(QubitId::new(4)).to_string();
        assert!(msg.contains("q4"));
    }
}
