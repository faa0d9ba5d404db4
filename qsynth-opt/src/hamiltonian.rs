//! Pauli Hamiltonians and Trotterised time evolution
//!
//! A [`Hamiltonian`] is a sum of weighted Pauli strings. Each Trotter step of
//! length `dt` applies `exp(-i·c·dt·P)` for every term in order. Single-qubit
//! terms become `RX`/`RY`/`RZ(2c·dt)`; longer strings rotate into the `Z`
//! basis, collect parity with a `CNOT` ladder and apply one `RZ`.
//!
//! Text form: terms joined by `+`, factors by `*`, e.g. `"Z0*Z1 + 0.5*X0"`.
//! A factor is either a number or a Pauli letter followed by a qubit index.

use crate::error::{OptError, Result};
use qsynth_core::QuantumCircuit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    X,
    Y,
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        };
        f.write_str(letter)
    }
}

/// `coefficient · P_q1 ⊗ P_q2 ⊗ …`, factors sorted by qubit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    pub coefficient: f64,
    pub factors: Vec<(Pauli, usize)>,
}

impl PauliTerm {
    /// # Errors
    /// [`OptError::InvalidArgument`] when a qubit appears twice
    pub fn new(coefficient: f64, factors: impl IntoIterator<Item = (Pauli, usize)>) -> Result<Self> {
        let mut by_qubit = BTreeMap::new();
        for (pauli, qubit) in factors {
            if by_qubit.insert(qubit, pauli).is_some() {
                return Err(OptError::invalid_argument(format!(
                    "qubit {qubit} appears twice in one Pauli term"
                )));
            }
        }
        Ok(Self {
            coefficient,
            factors: by_qubit.into_iter().map(|(q, p)| (p, q)).collect(),
        })
    }

    /// Constant terms only shift the global phase
    pub fn is_identity(&self) -> bool {
        self.factors.is_empty()
    }

    fn max_qubit(&self) -> Option<usize> {
        self.factors.last().map(|&(_, q)| q)
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coefficient)?;
        for (pauli, qubit) in &self.factors {
            write!(f, "*{pauli}{qubit}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<PauliTerm>,
}

impl Hamiltonian {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_term(mut self, term: PauliTerm) -> Self {
        self.terms.push(term);
        self
    }

    /// `J Σ Z_i Z_{i+1} + h Σ X_i` on an open chain
    pub fn transverse_field_ising(num_qubits: usize, coupling: f64, field: f64) -> Self {
        let mut hamiltonian = Self::new();
        for q in 1..num_qubits {
            hamiltonian.terms.push(PauliTerm {
                coefficient: coupling,
                factors: vec![(Pauli::Z, q - 1), (Pauli::Z, q)],
            });
        }
        for q in 0..num_qubits {
            hamiltonian.terms.push(PauliTerm {
                coefficient: field,
                factors: vec![(Pauli::X, q)],
            });
        }
        hamiltonian
    }

    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `1 + highest qubit` acted on, 0 for a constant Hamiltonian
    pub fn num_qubits(&self) -> usize {
        self.terms
            .iter()
            .filter_map(PauliTerm::max_qubit)
            .max()
            .map_or(0, |q| q + 1)
    }
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl FromStr for Hamiltonian {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self> {
        let mut hamiltonian = Self::new();
        for raw in s.split('+') {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(OptError::invalid_argument(format!("empty term in '{s}'")));
            }
            let mut coefficient = 1.0;
            let mut factors = Vec::new();
            for factor in raw.split('*').map(str::trim) {
                if let Ok(value) = factor.parse::<f64>() {
                    coefficient *= value;
                    continue;
                }
                factors.push(parse_factor(factor)?);
            }
            hamiltonian.terms.push(PauliTerm::new(coefficient, factors)?);
        }
        Ok(hamiltonian)
    }
}

fn parse_factor(factor: &str) -> Result<(Pauli, usize)> {
    let bad = || OptError::invalid_argument(format!("cannot read Pauli factor '{factor}'"));
    let mut chars = factor.chars();
    let pauli = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('X') => Pauli::X,
        Some('Y') => Pauli::Y,
        Some('Z') => Pauli::Z,
        _ => return Err(bad()),
    };
    let qubit = chars.as_str().parse::<usize>().map_err(|_| bad())?;
    Ok((pauli, qubit))
}

/// Append `exp(-i·c·dt·P)` for every term of `hamiltonian`
pub fn append_trotter_step(circuit: &mut QuantumCircuit, hamiltonian: &Hamiltonian, dt: f64) -> Result<()> {
    for term in hamiltonian.terms() {
        let angle = 2.0 * term.coefficient * dt;
        match term.factors.as_slice() {
            [] => {}
            [(Pauli::X, q)] => {
                circuit.rx(*q, angle)?;
            }
            [(Pauli::Y, q)] => {
                circuit.ry(*q, angle)?;
            }
            [(Pauli::Z, q)] => {
                circuit.rz(*q, angle)?;
            }
            factors => append_pauli_string(circuit, factors, angle)?,
        }
    }
    Ok(())
}

fn append_pauli_string(circuit: &mut QuantumCircuit, factors: &[(Pauli, usize)], angle: f64) -> Result<()> {
    for &(pauli, q) in factors {
        match pauli {
            Pauli::X => {
                circuit.h(q)?;
            }
            Pauli::Y => {
                circuit.rx(q, FRAC_PI_2)?;
            }
            Pauli::Z => {}
        }
    }
    for pair in factors.windows(2) {
        circuit.cnot(pair[0].1, pair[1].1)?;
    }
    if let Some(&(_, last)) = factors.last() {
        circuit.rz(last, angle)?;
    }
    for pair in factors.windows(2).rev() {
        circuit.cnot(pair[0].1, pair[1].1)?;
    }
    for &(pauli, q) in factors.iter().rev() {
        match pauli {
            Pauli::X => {
                circuit.h(q)?;
            }
            Pauli::Y => {
                circuit.rx(q, -FRAC_PI_2)?;
            }
            Pauli::Z => {}
        }
    }
    Ok(())
}

/// First-order Trotter evolution for `time` in `steps` equal slices, from `|0…0⟩`
///
/// # Errors
/// [`OptError::InvalidArgument`] for zero steps or a Hamiltonian that acts
/// on no qubit.
pub fn time_evolution(hamiltonian: &Hamiltonian, time: f64, steps: usize) -> Result<QuantumCircuit> {
    if steps == 0 {
        return Err(OptError::invalid_argument("at least one Trotter step is required"));
    }
    let n = hamiltonian.num_qubits();
    if n == 0 {
        return Err(OptError::invalid_argument("Hamiltonian acts on no qubits"));
    }

    let dt = time / steps as f64;
    let mut circuit = QuantumCircuit::new(n);
    for _ in 0..steps {
        append_trotter_step(&mut circuit, hamiltonian, dt)?;
    }
    tracing::debug!(
        qubits = n,
        terms = hamiltonian.terms().len(),
        steps,
        gates = circuit.len(),
        "generated Trotter circuit"
    );
    Ok(circuit)
}

/// `H` on every qubit, [`time_evolution`], then measure everything
pub fn simulation_circuit(hamiltonian: &Hamiltonian, time: f64, steps: usize) -> Result<QuantumCircuit> {
    let evolution = time_evolution(hamiltonian, time, steps)?;
    let mut circuit = QuantumCircuit::new(evolution.num_qubits());
    for q in 0..evolution.num_qubits() {
        circuit.h(q)?;
    }
    for gate in evolution.gates() {
        circuit.add_gate(gate.clone())?;
    }
    circuit.measure_all();
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qsynth_core::Complex64;
    use qsynth_state::{QuantumState, SimulatorConfig, StateVectorSimulator};

    fn evolve(circuit: &QuantumCircuit) -> QuantumState {
        StateVectorSimulator::new(SimulatorConfig::default())
            .statevector(circuit)
            .unwrap()
    }

    fn assert_amplitude(state: &QuantumState, index: usize, expected: Complex64) {
        let amp = state.amplitude(index).unwrap();
        assert_relative_eq!(amp.re, expected.re, epsilon = 1e-10);
        assert_relative_eq!(amp.im, expected.im, epsilon = 1e-10);
    }

    #[test]
    fn test_parse() {
        let h: Hamiltonian = "Z0*Z1 + 0.5*X2 + y1".parse().unwrap();
        assert_eq!(h.terms().len(), 3);
        assert_eq!(h.num_qubits(), 3);
        assert_eq!(h.terms()[1].coefficient, 0.5);
        assert_eq!(h.terms()[2].factors, vec![(Pauli::Y, 1)]);
        // factors are ordered by qubit
        let h: Hamiltonian = "-2 * X3 * Z1".parse().unwrap();
        assert_eq!(h.terms()[0].coefficient, -2.0);
        assert_eq!(h.terms()[0].factors, vec![(Pauli::Z, 1), (Pauli::X, 3)]);
        assert_eq!(h.to_string(), "-2*Z1*X3");
    }

    #[test]
    fn test_parse_errors() {
        assert!("Z0 + ".parse::<Hamiltonian>().is_err());
        assert!("Q0".parse::<Hamiltonian>().is_err());
        assert!("Z".parse::<Hamiltonian>().is_err());
        assert!("Z0*X0".parse::<Hamiltonian>().is_err());
    }

    #[test]
    fn test_zz_evolution_is_exact() {
        let h: Hamiltonian = "0.7*Z0*Z1".parse().unwrap();
        let circuit = simulation_circuit(&h, 0.5, 1).unwrap();
        let state = evolve(&circuit);
        let theta = 0.35;
        // even parity picks up e^{-iθ}, odd parity e^{iθ}
        let even = Complex64::from_polar(0.5, -theta);
        let odd = Complex64::from_polar(0.5, theta);
        assert_amplitude(&state, 0b00, even);
        assert_amplitude(&state, 0b01, odd);
        assert_amplitude(&state, 0b10, odd);
        assert_amplitude(&state, 0b11, even);
    }

    #[test]
    fn test_yy_evolution_from_zero() {
        let h: Hamiltonian = "Y0*Y1".parse().unwrap();
        let theta = 0.37;
        let state = evolve(&time_evolution(&h, theta, 1).unwrap());
        // exp(-iθ YY)|00⟩ = cos θ |00⟩ + i sin θ |11⟩
        assert_amplitude(&state, 0b00, Complex64::new(theta.cos(), 0.0));
        assert_amplitude(&state, 0b11, Complex64::new(0.0, theta.sin()));
        assert_relative_eq!(state.probability(0b01), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_x_term_is_rx() {
        let h: Hamiltonian = "X0".parse().unwrap();
        let circuit = time_evolution(&h, 0.4, 4).unwrap();
        assert_eq!(circuit.len(), 4);
        assert!(circuit.gates().iter().all(|g| g.name() == "rx"));
        let state = evolve(&circuit);
        assert_relative_eq!(state.probability(1), 0.4f64.sin().powi(2), epsilon = 1e-10);
    }

    #[test]
    fn test_transverse_field_ising_layout() {
        let h = Hamiltonian::transverse_field_ising(3, 1.0, 0.5);
        assert_eq!(h.terms().len(), 5);
        let circuit = simulation_circuit(&h, 1.0, 2).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.measurements().len(), 3);
        // two ZZ terms per step, two CNOTs each
        assert_eq!(circuit.metrics().cx_count, 8);
    }

    #[test]
    fn test_rejects_degenerate_input() {
        let h: Hamiltonian = "Z0".parse().unwrap();
        assert!(time_evolution(&h, 1.0, 0).is_err());
        let constant: Hamiltonian = "3.0".parse().unwrap();
        assert!(time_evolution(&constant, 1.0, 1).is_err());
    }
}
