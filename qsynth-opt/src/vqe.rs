//! Hardware-efficient VQE ansatz

use crate::error::{OptError, Result};
use qsynth_core::QuantumCircuit;

/// Angles consumed per qubit per layer: `RY`, `RZ`, then a closing `RY`
pub const PARAMETERS_PER_QUBIT: usize = 3;

/// Parameter count for `num_qubits` qubits and `layers` layers
pub fn num_parameters(num_qubits: usize, layers: usize) -> usize {
    PARAMETERS_PER_QUBIT * num_qubits * layers
}

/// Build the ansatz from a flat parameter list
///
/// Each layer applies `RY` then `RZ` to every qubit, a `CNOT` ladder
/// `(0,1), (1,2), …`, and a final `RY` on every qubit. Parameters are read
/// in gate order.
///
/// # Example
/// ```
/// use qsynth_opt::vqe::{hardware_efficient_ansatz, num_parameters};
///
/// let params = vec![0.1; num_parameters(3, 2)];
/// let circuit = hardware_efficient_ansatz(3, 2, &params).unwrap();
/// assert_eq!(circuit.metrics().cx_count, 4);
/// ```
pub fn hardware_efficient_ansatz(
    num_qubits: usize,
    layers: usize,
    params: &[f64],
) -> Result<QuantumCircuit> {
    if num_qubits == 0 {
        return Err(OptError::invalid_argument("ansatz needs at least one qubit"));
    }
    let expected = num_parameters(num_qubits, layers);
    if params.len() != expected {
        return Err(OptError::invalid_argument(format!(
            "expected {expected} parameters for {num_qubits} qubits × {layers} layers, got {}",
            params.len()
        )));
    }

    let mut circuit = QuantumCircuit::new(num_qubits);
    for layer in params.chunks_exact(PARAMETERS_PER_QUBIT * num_qubits) {
        let (rotations, closing) = layer.split_at(2 * num_qubits);
        for (q, pair) in rotations.chunks_exact(2).enumerate() {
            circuit.ry(q, pair[0])?.rz(q, pair[1])?;
        }
        for q in 1..num_qubits {
            circuit.cnot(q - 1, q)?;
        }
        for (q, &theta) in closing.iter().enumerate() {
            circuit.ry(q, theta)?;
        }
    }
    Ok(circuit)
}
