//! QAOA circuit generation
//!
//! Builds the alternating cost/mixer circuit for a QUBO from given angles.
//! Parameter training is left to the caller.
//!
//! # Circuit layout
//! 1. Initial state, `H` on every variable qubit by default
//! 2. For each of `p = min(len γ, len β)` layers:
//!    - every diagonal term `c·x_i` becomes `RZ(γ·c)` on qubit `i`
//!    - every pair term `c·x_i·x_j` becomes `CNOT(i,j) · RZ(γ·c) on j · CNOT(i,j)`
//!    - the mixer applies `RX(β)` to every qubit
//! 3. Measure each qubit into its classical bit

use crate::error::{OptError, Result};
use crate::qubo::QuboMatrix;
use qsynth_core::QuantumCircuit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Initial state preparation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialState {
    /// `|+⟩^⊗n`
    #[default]
    UniformSuperposition,
    /// `|0⟩^⊗n`
    Zero,
}

/// Configuration for QAOA circuit generation
#[derive(Debug, Clone, PartialEq)]
pub struct QaoaConfig {
    pub initial_state: InitialState,
    /// Append a measurement of every qubit
    pub measure: bool,
}

impl Default for QaoaConfig {
    fn default() -> Self {
        Self {
            initial_state: InitialState::UniformSuperposition,
            measure: true,
        }
    }
}

impl QaoaConfig {
    pub fn with_initial_state(mut self, initial_state: InitialState) -> Self {
        self.initial_state = initial_state;
        self
    }

    pub fn with_measurement(mut self, measure: bool) -> Self {
        self.measure = measure;
        self
    }
}

/// Number of layers a pair of angle lists produces
pub fn num_layers(gamma: &[f64], beta: &[f64]) -> usize {
    gamma.len().min(beta.len())
}

/// QAOA circuit over the variables of `qubo`
///
/// # Errors
/// [`OptError::InvalidArgument`] when the QUBO has no variables.
pub fn qaoa_circuit(
    qubo: &QuboMatrix,
    gamma: &[f64],
    beta: &[f64],
    config: &QaoaConfig,
) -> Result<QuantumCircuit> {
    let n = qubo.num_variables();
    if n == 0 {
        return Err(OptError::invalid_argument("QUBO has no variables"));
    }

    let mut circuit = QuantumCircuit::new(n);
    if config.initial_state == InitialState::UniformSuperposition {
        for q in 0..n {
            circuit.h(q)?;
        }
    }

    let layers = num_layers(gamma, beta);
    for (&g, &b) in gamma.iter().zip(beta).take(layers) {
        apply_cost_layer(&mut circuit, qubo, g)?;
        for q in 0..n {
            circuit.rx(q, b)?;
        }
    }

    if config.measure {
        circuit.measure_all();
    }

    tracing::debug!(
        qubits = n,
        layers,
        gates = circuit.len(),
        depth = circuit.depth(),
        "generated QAOA circuit"
    );
    Ok(circuit)
}

/// `exp(-iγC)` for the QUBO cost, in `(i, j)` order
fn apply_cost_layer(circuit: &mut QuantumCircuit, qubo: &QuboMatrix, gamma: f64) -> Result<()> {
    for ((i, j), coeff) in qubo.iter() {
        if i == j {
            circuit.rz(i, gamma * coeff)?;
        } else {
            circuit.cnot(i, j)?.rz(j, gamma * coeff)?.cnot(i, j)?;
        }
    }
    Ok(())
}

/// Random starting angles: `γ ∈ [0, π]`, `β ∈ [0, π/2]`
pub fn random_initial_parameters(depth: usize, seed: Option<u64>) -> (Vec<f64>, Vec<f64>) {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut gamma = Vec::with_capacity(depth);
    let mut beta = Vec::with_capacity(depth);
    for _ in 0..depth {
        gamma.push(rng.gen::<f64>() * std::f64::consts::PI);
        beta.push(rng.gen::<f64>() * std::f64::consts::FRAC_PI_2);
    }
    (gamma, beta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> QuboMatrix {
        QuboMatrix::from_terms(
            3,
            [
                (0, 0, 2.0),
                (1, 1, 2.0),
                (2, 2, 2.0),
                (0, 1, -2.0),
                (1, 2, -2.0),
                (0, 2, -2.0),
            ],
        )
    }

    #[test]
    fn test_gate_layout() {
        let circuit = qaoa_circuit(&triangle(), &[0.5], &[0.3], &QaoaConfig::default()).unwrap();
        // 3 H + (3 RZ + 3 × 3 for pairs) + 3 RX
        assert_eq!(circuit.len(), 3 + 3 + 9 + 3);
        assert_eq!(circuit.measurements().len(), 3);

        let names: Vec<&str> = circuit.gates().iter().map(|g| g.name()).collect();
        assert_eq!(&names[..3], &["h", "h", "h"]);
        // (0,0) first, then the (0,1) pair
        assert_eq!(&names[3..7], &["rz", "cnot", "rz", "cnot"]);
        assert_relative_eq!(circuit.gates()[3].angle().unwrap(), 1.0);
        assert_relative_eq!(circuit.gates()[5].angle().unwrap(), -1.0);
        assert_eq!(circuit.gates()[5].qubits()[0].index(), 1);
        assert_eq!(names.last(), Some(&"rx"));
    }

    #[test]
    fn test_layers_take_shorter_list() {
        let one = qaoa_circuit(&triangle(), &[0.1], &[0.2], &QaoaConfig::default()).unwrap();
        let two = qaoa_circuit(&triangle(), &[0.1, 0.2, 0.3], &[0.2, 0.4], &QaoaConfig::default())
            .unwrap();
        assert_eq!(two.len() - one.len(), 15);
        assert_eq!(num_layers(&[0.1, 0.2, 0.3], &[0.2, 0.4]), 2);
    }

    #[test]
    fn test_no_layers() {
        let circuit = qaoa_circuit(&triangle(), &[], &[0.2], &QaoaConfig::default()).unwrap();
        assert_eq!(circuit.len(), 3);
    }

    #[test]
    fn test_config_toggles() {
        let config = QaoaConfig::default()
            .with_initial_state(InitialState::Zero)
            .with_measurement(false);
        let circuit = qaoa_circuit(&triangle(), &[0.5], &[0.3], &config).unwrap();
        assert_eq!(circuit.len(), 15);
        assert!(circuit.measurements().is_empty());
    }

    #[test]
    fn test_empty_qubo_rejected() {
        let err = qaoa_circuit(&QuboMatrix::new(0), &[0.1], &[0.1], &QaoaConfig::default());
        assert!(matches!(err, Err(OptError::InvalidArgument(_))));
    }

    #[test]
    fn test_random_parameters() {
        let (gamma, beta) = random_initial_parameters(3, Some(42));
        assert_eq!(gamma.len(), 3);
        assert_eq!(beta.len(), 3);
        assert!(gamma.iter().all(|g| (0.0..=std::f64::consts::PI).contains(g)));
        assert!(beta.iter().all(|b| (0.0..=std::f64::consts::FRAC_PI_2).contains(b)));
        assert_eq!(random_initial_parameters(3, Some(42)), (gamma, beta));
    }
}
