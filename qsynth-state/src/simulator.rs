//! Dense state-vector simulator
//!
//! Applies every gate of a [`QuantumCircuit`] to `|0…0⟩` and samples the
//! recorded measurements.
//!
//! # Example
//!
//! ```
//! use qsynth_core::QuantumCircuit;
//! use qsynth_state::{SimulatorConfig, StateVectorSimulator};
//!
//! let mut circuit = QuantumCircuit::new(2);
//! circuit.h(0).unwrap().cnot(0, 1).unwrap();
//! circuit.measure_all();
//!
//! let mut sim = StateVectorSimulator::new(SimulatorConfig::default().with_seed(7));
//! let result = sim.run(&circuit).unwrap();
//! assert!(result.counts.keys().all(|k| k == "00" || k == "11"));
//! ```

use crate::error::{Result, StateError};
use crate::state::QuantumState;
use num_complex::Complex64;
use qsynth_core::complex::{ComplexExt, ZERO};
use qsynth_core::{QuantumCircuit, QuantumError, QuantumGate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// Simulator settings
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Number of measurement shots per run
    pub shots: usize,

    /// Random seed for reproducibility
    pub seed: Option<u64>,

    /// Widest circuit accepted
    pub max_qubits: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            seed: None,
            max_qubits: 24,
        }
    }
}

impl SimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }
}

/// Final state plus sampled measurement outcomes
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub state: QuantumState,
    /// Classical-register bitstrings (highest bit first) to occurrence counts
    pub counts: BTreeMap<String, usize>,
    pub shots: usize,
}

impl SimulationResult {
    /// Most frequent bitstring, ties broken by lexical order
    pub fn most_frequent(&self) -> Option<&str> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, _)| k.as_str())
    }
}

pub struct StateVectorSimulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl StateVectorSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        let rng = if let Some(seed) = config.seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Evolve `|0…0⟩` through the circuit without sampling
    pub fn statevector(&self, circuit: &QuantumCircuit) -> Result<QuantumState> {
        let n = circuit.num_qubits();
        if n > self.config.max_qubits {
            return Err(StateError::Circuit(QuantumError::invalid_argument(format!(
                "{n} qubits exceeds simulator limit of {}",
                self.config.max_qubits
            ))));
        }

        let mut amplitudes = QuantumState::zero(n).into_amplitudes();
        for gate in circuit.gates() {
            apply_gate(&mut amplitudes, gate);
        }
        QuantumState::new(amplitudes)
    }

    /// Evolve and sample `shots` measurement outcomes
    ///
    /// Counts stay empty when the circuit records no measurements.
    pub fn run(&mut self, circuit: &QuantumCircuit) -> Result<SimulationResult> {
        let state = self.statevector(circuit)?;
        tracing::debug!(
            qubits = circuit.num_qubits(),
            gates = circuit.len(),
            shots = self.config.shots,
            "simulating circuit"
        );

        let mut counts = BTreeMap::new();
        if !circuit.measurements().is_empty() {
            let cumulative: Vec<f64> = state
                .amplitudes()
                .iter()
                .scan(0.0, |acc, a| {
                    *acc += a.probability();
                    Some(*acc)
                })
                .collect();
            let total = cumulative.last().copied().unwrap_or(0.0);

            for _ in 0..self.config.shots {
                let r = self.rng.gen::<f64>() * total;
                let index = cumulative
                    .partition_point(|&c| c <= r)
                    .min(cumulative.len() - 1);
                *counts.entry(classical_bitstring(circuit, index)).or_insert(0) += 1;
            }
        }

        Ok(SimulationResult {
            state,
            counts,
            shots: self.config.shots,
        })
    }
}

/// Read the measured qubits of `basis_index` into the classical register
fn classical_bitstring(circuit: &QuantumCircuit, basis_index: usize) -> String {
    let mut bits = vec![b'0'; circuit.num_classical_bits()];
    let width = bits.len();
    for m in circuit.measurements() {
        if (basis_index >> m.qubit.index()) & 1 == 1 {
            bits[width - 1 - m.classical_bit] = b'1';
        }
    }
    String::from_utf8_lossy(&bits).into_owned()
}

/// Multiply the gate's `2^k × 2^k` matrix into the affected amplitude blocks
///
/// The first qubit listed on the gate is the most significant bit of the
/// gate-local index.
fn apply_gate(amplitudes: &mut [Complex64], gate: &QuantumGate) {
    let qubits = gate.qubits();
    let k = qubits.len();
    let matrix = gate.matrix();
    let local_dim = 1usize << k;
    if matrix.dim() != local_dim {
        tracing::warn!(gate = gate.name(), "matrix size does not match qubit count, skipping");
        return;
    }

    let gate_mask = qubits.iter().fold(0usize, |m, q| m | q.mask());
    let offsets: Vec<usize> = (0..local_dim)
        .map(|local| {
            qubits.iter().enumerate().fold(0usize, |acc, (j, q)| {
                if (local >> (k - 1 - j)) & 1 == 1 {
                    acc | q.mask()
                } else {
                    acc
                }
            })
        })
        .collect();

    let mut block = vec![ZERO; local_dim];
    for base in 0..amplitudes.len() {
        if base & gate_mask != 0 {
            continue;
        }
        for (slot, &offset) in block.iter_mut().zip(&offsets) {
            *slot = amplitudes[base | offset];
        }
        for (row, &offset) in offsets.iter().enumerate() {
            amplitudes[base | offset] = (0..local_dim)
                .map(|col| matrix.get(row, col) * block[col])
                .sum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn seeded() -> StateVectorSimulator {
        StateVectorSimulator::new(SimulatorConfig::default().with_seed(42).with_shots(500))
    }

    #[test]
    fn test_bell_statevector() {
        let mut c = QuantumCircuit::new(2);
        c.h(0).unwrap().cnot(0, 1).unwrap();
        let state = seeded().statevector(&c).unwrap();
        assert_relative_eq!(state.amplitudes()[0].re, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(state.amplitudes()[3].re, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(state.probability(1), 0.0, epsilon = 1e-12);
        assert_relative_eq!(state.probability(2), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_x_sets_low_bit() {
        let mut c = QuantumCircuit::new(3);
        c.x(0).unwrap();
        let state = seeded().statevector(&c).unwrap();
        assert_relative_eq!(state.probability(0b001), 1.0);
    }

    #[test]
    fn test_cnot_control_order() {
        // control is q1, target q0
        let mut c = QuantumCircuit::new(2);
        c.x(1).unwrap().cnot(1, 0).unwrap();
        let state = seeded().statevector(&c).unwrap();
        assert_relative_eq!(state.probability(0b11), 1.0);

        let mut idle = QuantumCircuit::new(2);
        idle.x(0).unwrap().cnot(1, 0).unwrap();
        let state = seeded().statevector(&idle).unwrap();
        assert_relative_eq!(state.probability(0b01), 1.0);
    }

    #[test]
    fn test_toffoli_truth_table_row() {
        let mut c = QuantumCircuit::new(3);
        c.x(0).unwrap().x(1).unwrap().toffoli(0, 1, 2).unwrap();
        let state = seeded().statevector(&c).unwrap();
        assert_relative_eq!(state.probability(0b111), 1.0);
    }

    #[test]
    fn test_counts_only_with_measurements() {
        let mut c = QuantumCircuit::new(1);
        c.h(0).unwrap();
        let result = seeded().run(&c).unwrap();
        assert!(result.counts.is_empty());

        c.measure_all();
        let result = seeded().run(&c).unwrap();
        assert_eq!(result.counts.values().sum::<usize>(), 500);
        assert!(result.counts.contains_key("0"));
        assert!(result.counts.contains_key("1"));
    }

    #[test]
    fn test_classical_register_ordering() {
        let mut c = QuantumCircuit::with_classical_bits(2, 3);
        c.x(0).unwrap().measure(0, 2).unwrap();
        let result = seeded().run(&c).unwrap();
        assert_eq!(result.counts.len(), 1);
        assert_eq!(result.most_frequent(), Some("100"));
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let mut c = QuantumCircuit::new(2);
        c.h(0).unwrap().h(1).unwrap().measure_all();
        let a = seeded().run(&c).unwrap();
        let b = seeded().run(&c).unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_qubit_limit() {
        let sim = StateVectorSimulator::new(SimulatorConfig::default().with_max_qubits(2));
        let c = QuantumCircuit::new(3);
        assert!(matches!(sim.statevector(&c), Err(StateError::Circuit(_))));
    }
}
