//! Quantum Fourier transform circuits
//!
//! Qubit 0 is the least significant bit of the register, so the forward
//! transform maps `|x⟩` to `Σ_k e^{2πi·xk/N} |k⟩ / √N` up to a global phase.
//! Controlled phases are expanded into `RZ` and `CNOT`.

use crate::error::{OptError, Result};
use qsynth_core::{QuantumCircuit, QuantumGate};
use std::f64::consts::PI;

/// Append a controlled phase `diag(1, 1, 1, e^{iθ})`
///
/// Exact up to a global phase of `e^{-iθ/4}`.
pub fn controlled_phase(
    circuit: &mut QuantumCircuit,
    control: usize,
    target: usize,
    theta: f64,
) -> Result<()> {
    circuit
        .rz(target, theta / 2.0)?
        .cnot(control, target)?
        .rz(target, -theta / 2.0)?
        .cnot(control, target)?
        .rz(control, theta / 2.0)?;
    Ok(())
}

/// Forward QFT on `num_qubits` qubits, ending with the bit-reversal swaps
///
/// # Example
/// ```
/// use qsynth_opt::qft::qft_circuit;
///
/// let circuit = qft_circuit(3).unwrap();
/// assert_eq!(circuit.gate_counts()["swap"], 1);
/// assert_eq!(circuit.gate_counts()["h"], 3);
/// ```
pub fn qft_circuit(num_qubits: usize) -> Result<QuantumCircuit> {
    if num_qubits == 0 {
        return Err(OptError::invalid_argument("QFT needs at least one qubit"));
    }

    let mut circuit = QuantumCircuit::new(num_qubits);
    for target in (0..num_qubits).rev() {
        circuit.h(target)?;
        for control in (0..target).rev() {
            let theta = PI / ((target - control) as f64).exp2();
            controlled_phase(&mut circuit, control, target, theta)?;
        }
    }
    for q in 0..num_qubits / 2 {
        circuit.swap(q, num_qubits - 1 - q)?;
    }

    tracing::debug!(qubits = num_qubits, gates = circuit.len(), "generated QFT circuit");
    Ok(circuit)
}

/// Inverse QFT: the forward gates reversed and inverted
pub fn inverse_qft_circuit(num_qubits: usize) -> Result<QuantumCircuit> {
    let forward = qft_circuit(num_qubits)?;
    let gates = forward.gates().iter().rev().map(QuantumGate::inverse).collect();
    Ok(forward.with_gates(gates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qsynth_core::Complex64;
    use qsynth_state::{QuantumState, SimulatorConfig, StateVectorSimulator};

    fn simulator() -> StateVectorSimulator {
        StateVectorSimulator::new(SimulatorConfig::default())
    }

    /// `x` prepared with X gates, then `body` appended
    fn run_from_basis(num_qubits: usize, x: usize, body: &QuantumCircuit) -> QuantumState {
        let mut circuit = QuantumCircuit::new(num_qubits);
        for q in 0..num_qubits {
            if (x >> q) & 1 == 1 {
                circuit.x(q).unwrap();
            }
        }
        for gate in body.gates() {
            circuit.add_gate(gate.clone()).unwrap();
        }
        simulator().statevector(&circuit).unwrap()
    }

    #[test]
    fn test_zero_state_maps_to_uniform() {
        let state = simulator().statevector(&qft_circuit(4).unwrap()).unwrap();
        for index in 0..16 {
            assert_relative_eq!(state.probability(index), 1.0 / 16.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_basis_states_get_fourier_phases() {
        let n = 3;
        let dim = 1usize << n;
        let circuit = qft_circuit(n).unwrap();
        for x in 0..dim {
            let expected: Vec<_> = (0..dim)
                .map(|k| {
                    Complex64::from_polar(
                        1.0 / (dim as f64).sqrt(),
                        2.0 * PI * (x * k) as f64 / dim as f64,
                    )
                })
                .collect();
            let expected = QuantumState::new(expected).unwrap();
            let fidelity = run_from_basis(n, x, &circuit).fidelity(&expected).unwrap();
            assert_relative_eq!(fidelity, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inverse_undoes_forward() {
        let n = 3;
        let mut round_trip = qft_circuit(n).unwrap();
        for gate in inverse_qft_circuit(n).unwrap().gates() {
            round_trip.add_gate(gate.clone()).unwrap();
        }
        for x in 0..(1 << n) {
            let state = run_from_basis(n, x, &round_trip);
            assert_relative_eq!(state.probability(x), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_single_qubit_is_hadamard() {
        let circuit = qft_circuit(1).unwrap();
        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.gates()[0].name(), "h");
        assert!(qft_circuit(0).is_err());
    }
}
