//! Quantum circuit representation

use crate::catalog::{GateParameters, GateType};
use crate::gate::QuantumGate;
use crate::{QuantumError, QubitId, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Basis a measurement is taken in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeasurementBasis {
    #[default]
    Computational,
}

impl fmt::Display for MeasurementBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementBasis::Computational => f.write_str("computational"),
        }
    }
}

/// Measurement of one qubit into one classical bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasurementOperation {
    pub qubit: QubitId,
    pub classical_bit: usize,
    pub basis: MeasurementBasis,
}

/// Aggregate statistics over a circuit
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitMetrics {
    pub total_gates: usize,
    pub single_qubit_gates: usize,
    pub two_qubit_gates: usize,
    pub multi_qubit_gates: usize,
    pub cx_count: usize,
    pub depth: usize,
    pub measurements: usize,
    pub fidelity: f64,
    pub is_optimized: bool,
}

/// A quantum circuit
///
/// Gates are kept in application order. The circuit fidelity is the product
/// of the fidelities of every gate it contains.
///
/// # Example
/// ```
/// use qsynth_core::QuantumCircuit;
///
/// let mut circuit = QuantumCircuit::new(2);
/// circuit.h(0).unwrap().cnot(0, 1).unwrap();
/// assert_eq!(circuit.len(), 2);
/// assert_eq!(circuit.depth(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct QuantumCircuit {
    num_qubits: usize,
    num_classical_bits: usize,
    gates: Vec<QuantumGate>,
    measurements: Vec<MeasurementOperation>,
    fidelity: f64,
    qubit_mapping: BTreeMap<usize, usize>,
    optimized: bool,
    applied_passes: Vec<String>,
}

impl QuantumCircuit {
    /// Create a circuit with one classical bit per qubit
    ///
    /// # Panics
    /// Panics if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Self {
        Self::with_classical_bits(num_qubits, num_qubits)
    }

    /// Create a circuit with an explicit classical register width
    ///
    /// # Panics
    /// Panics if `num_qubits` is 0
    pub fn with_classical_bits(num_qubits: usize, num_classical_bits: usize) -> Self {
        assert!(num_qubits > 0, "Circuit must have at least one qubit");
        Self {
            num_qubits,
            num_classical_bits,
            gates: Vec::new(),
            measurements: Vec::new(),
            fidelity: 1.0,
            qubit_mapping: (0..num_qubits).map(|q| (q, q)).collect(),
            optimized: false,
            applied_passes: Vec::new(),
        }
    }

    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub const fn num_classical_bits(&self) -> usize {
        self.num_classical_bits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn gates(&self) -> &[QuantumGate] {
        &self.gates
    }

    pub fn measurements(&self) -> &[MeasurementOperation] {
        &self.measurements
    }

    /// Product of all gate fidelities
    #[inline]
    pub fn fidelity(&self) -> f64 {
        self.fidelity
    }

    /// Logical-to-physical qubit assignment
    pub fn qubit_mapping(&self) -> &BTreeMap<usize, usize> {
        &self.qubit_mapping
    }

    pub fn set_qubit_mapping(&mut self, mapping: BTreeMap<usize, usize>) {
        self.qubit_mapping = mapping;
    }

    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    /// Names of the optimization passes that changed this circuit
    pub fn applied_passes(&self) -> &[String] {
        &self.applied_passes
    }

    /// Append a gate
    ///
    /// # Errors
    /// Returns error if any qubit index is out of bounds
    pub fn add_gate(&mut self, gate: QuantumGate) -> Result<&mut Self> {
        for qubit in gate.qubits() {
            if qubit.index() >= self.num_qubits {
                return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
            }
        }
        self.fidelity *= gate.fidelity();
        self.gates.push(gate);
        Ok(self)
    }

    fn push(&mut self, gate_type: GateType, qubits: &[usize]) -> Result<&mut Self> {
        let gate = QuantumGate::new(gate_type, qubits)?;
        self.add_gate(gate)
    }

    fn push_rotation(&mut self, gate_type: GateType, qubit: usize, angle: f64) -> Result<&mut Self> {
        let gate = QuantumGate::rotation(gate_type, qubit, angle)?;
        self.add_gate(gate)
    }

    pub fn identity(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(GateType::Identity, &[qubit])
    }

    pub fn h(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(GateType::H, &[qubit])
    }

    pub fn x(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(GateType::X, &[qubit])
    }

    pub fn y(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(GateType::Y, &[qubit])
    }

    pub fn z(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(GateType::Z, &[qubit])
    }

    pub fn s(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(GateType::S, &[qubit])
    }

    pub fn sdg(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(GateType::Sdg, &[qubit])
    }

    pub fn t(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(GateType::T, &[qubit])
    }

    pub fn tdg(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(GateType::Tdg, &[qubit])
    }

    pub fn rx(&mut self, qubit: usize, theta: f64) -> Result<&mut Self> {
        self.push_rotation(GateType::Rx, qubit, theta)
    }

    pub fn ry(&mut self, qubit: usize, phi: f64) -> Result<&mut Self> {
        self.push_rotation(GateType::Ry, qubit, phi)
    }

    pub fn rz(&mut self, qubit: usize, lambda: f64) -> Result<&mut Self> {
        self.push_rotation(GateType::Rz, qubit, lambda)
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.push(GateType::Cnot, &[control, target])
    }

    pub fn cz(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.push(GateType::Cz, &[control, target])
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        self.push(GateType::Swap, &[a, b])
    }

    pub fn iswap(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        self.push(GateType::ISwap, &[a, b])
    }

    pub fn toffoli(&mut self, c1: usize, c2: usize, target: usize) -> Result<&mut Self> {
        self.push(GateType::Toffoli, &[c1, c2, target])
    }

    pub fn fredkin(&mut self, control: usize, a: usize, b: usize) -> Result<&mut Self> {
        self.push(GateType::Fredkin, &[control, a, b])
    }

    /// Append a custom unitary given as flattened real/imaginary parts
    pub fn custom(&mut self, qubits: &[usize], real: &[f64], imag: &[f64]) -> Result<&mut Self> {
        let gate = QuantumGate::custom(qubits, real, imag)?;
        self.add_gate(gate)
    }

    /// Append a controlled gate with `controls` followed by `target`
    pub fn add_controlled_gate(
        &mut self,
        gate_type: GateType,
        controls: &[usize],
        target: usize,
        parameters: GateParameters,
    ) -> Result<&mut Self> {
        let qubits: Vec<usize> = controls.iter().copied().chain(Some(target)).collect();
        let gate = QuantumGate::with_parameters(gate_type, &qubits, parameters)?;
        self.add_gate(gate)
    }

    /// Record a computational-basis measurement
    pub fn measure(&mut self, qubit: usize, classical_bit: usize) -> Result<&mut Self> {
        if qubit >= self.num_qubits {
            return Err(QuantumError::invalid_qubit(qubit, self.num_qubits));
        }
        if classical_bit >= self.num_classical_bits {
            return Err(QuantumError::InvalidClassicalBit(
                classical_bit,
                self.num_classical_bits,
            ));
        }
        self.measurements.push(MeasurementOperation {
            qubit: QubitId::new(qubit),
            classical_bit,
            basis: MeasurementBasis::Computational,
        });
        Ok(self)
    }

    /// Measure qubit `i` into classical bit `i`
    ///
    /// Stops at whichever register is narrower.
    pub fn measure_all(&mut self) -> &mut Self {
        for q in 0..self.num_qubits.min(self.num_classical_bits) {
            self.measurements.push(MeasurementOperation {
                qubit: QubitId::new(q),
                classical_bit: q,
                basis: MeasurementBasis::Computational,
            });
        }
        self
    }

    /// Length of the longest chain of gates sharing qubits
    ///
    /// # Example
    /// ```
    /// use qsynth_core::QuantumCircuit;
    ///
    /// let mut c = QuantumCircuit::new(3);
    /// c.h(0).unwrap().h(1).unwrap().h(2).unwrap();
    /// assert_eq!(c.depth(), 1);
    /// c.cnot(0, 1).unwrap();
    /// assert_eq!(c.depth(), 2);
    /// ```
    pub fn depth(&self) -> usize {
        let mut last_used = vec![0usize; self.num_qubits];
        let mut depth = 0;
        for gate in &self.gates {
            let level = gate
                .qubits()
                .iter()
                .map(|q| last_used[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in gate.qubits() {
                last_used[q.index()] = level;
            }
            depth = depth.max(level);
        }
        depth
    }

    /// Occurrences of each gate name
    pub fn gate_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for gate in &self.gates {
            *counts.entry(gate.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn metrics(&self) -> CircuitMetrics {
        let by_width = |n: usize| self.gates.iter().filter(|g| g.num_qubits() == n).count();
        CircuitMetrics {
            total_gates: self.gates.len(),
            single_qubit_gates: by_width(1),
            two_qubit_gates: by_width(2),
            multi_qubit_gates: self.gates.iter().filter(|g| g.num_qubits() > 2).count(),
            cx_count: self
                .gates
                .iter()
                .filter(|g| g.gate_type() == &GateType::Cnot)
                .count(),
            depth: self.depth(),
            measurements: self.measurements.len(),
            fidelity: self.fidelity,
            is_optimized: self.optimized,
        }
    }

    /// Same registers, measurements and metadata with a new gate list
    ///
    /// Fidelity is recomputed from `gates`.
    pub fn with_gates(&self, gates: Vec<QuantumGate>) -> Self {
        let fidelity = gates.iter().map(QuantumGate::fidelity).product();
        Self {
            num_qubits: self.num_qubits,
            num_classical_bits: self.num_classical_bits,
            gates,
            measurements: self.measurements.clone(),
            fidelity,
            qubit_mapping: self.qubit_mapping.clone(),
            optimized: self.optimized,
            applied_passes: self.applied_passes.clone(),
        }
    }

    /// Mark as optimized, recording the passes that changed it
    pub fn into_optimized(mut self, passes: impl IntoIterator<Item = String>) -> Self {
        self.optimized = true;
        for pass in passes {
            if !self.applied_passes.contains(&pass) {
                self.applied_passes.push(pass);
            }
        }
        self
    }

    pub fn clear(&mut self) {
        self.gates.clear();
        self.measurements.clear();
        self.fidelity = 1.0;
    }
}

impl fmt::Display for QuantumCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "QuantumCircuit({} qubits, {} classical bits, {} gates, depth {})",
            self.num_qubits,
            self.num_classical_bits,
            self.gates.len(),
            self.depth()
        )?;
        for (i, gate) in self.gates.iter().enumerate() {
            writeln!(f, "  {i}: {gate}")?;
        }
        for m in &self.measurements {
            writeln!(f, "  measure {} -> c{} ({})", m.qubit, m.classical_bit, m.basis)?;
        }
        Ok(())
    }
}
