//! Quantum gates
//!
//! A [`QuantumGate`] is an immutable value: a catalog type, the qubits it acts
//! on, its parameters and the unitary synthesized from them. Transformations
//! such as [`QuantumGate::inverse`] return new gates.

use crate::catalog::{
    custom_matrix, synthesize, GateParameters, GateType, FIDELITY_KEY, GATE_TIME_KEY,
};
use crate::matrix::GateMatrix;
use crate::qubit::{qubit_list, QubitList};
use crate::{QuantumError, QubitId, Result};
use std::fmt;

/// Tolerance used when checking unitarity and zero angles
pub const EPSILON: f64 = 1e-10;

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumGate {
    gate_type: GateType,
    qubits: QubitList,
    parameters: GateParameters,
    matrix: GateMatrix,
    fidelity: f64,
}

impl QuantumGate {
    /// Create a parameterless gate
    ///
    /// # Errors
    /// Fails on an arity mismatch or a repeated qubit
    ///
    /// # Example
    /// ```
    /// use qsynth_core::{GateType, QuantumGate};
    ///
    /// let cx = QuantumGate::new(GateType::Cnot, &[0, 1]).unwrap();
    /// assert!(cx.is_controlled());
    /// assert!(QuantumGate::new(GateType::Cnot, &[0, 0]).is_err());
    /// ```
    pub fn new(gate_type: GateType, qubits: &[usize]) -> Result<Self> {
        Self::with_parameters(gate_type, qubits, GateParameters::new())
    }

    /// Create a gate with parameters
    ///
    /// A `"fidelity"` entry sets the gate fidelity and must lie in `(0, 1]`.
    pub fn with_parameters(
        gate_type: GateType,
        qubits: &[usize],
        mut parameters: GateParameters,
    ) -> Result<Self> {
        let qubits = qubit_list(qubits);
        validate_qubits(&gate_type, &qubits)?;

        let fidelity = parameters.remove(FIDELITY_KEY).unwrap_or(1.0);
        if !(fidelity > 0.0 && fidelity <= 1.0) {
            return Err(QuantumError::invalid_argument(format!(
                "gate fidelity must be in (0, 1], got {fidelity}"
            )));
        }

        let matrix = synthesize(&gate_type, &parameters, qubits.len());
        Ok(Self {
            gate_type,
            qubits,
            parameters,
            matrix,
            fidelity,
        })
    }

    /// Single-qubit rotation about the axis implied by `gate_type`
    pub fn rotation(gate_type: GateType, qubit: usize, angle: f64) -> Result<Self> {
        let key = gate_type.angle_key().ok_or_else(|| {
            QuantumError::invalid_argument(format!("'{gate_type}' is not a rotation gate"))
        })?;
        let mut parameters = GateParameters::new();
        parameters.insert(key.to_string(), angle);
        Self::with_parameters(gate_type, &[qubit], parameters)
    }

    /// Gate with a user-supplied unitary given as flattened real/imaginary parts
    ///
    /// Malformed dimensions fall back to the identity.
    pub fn custom(qubits: &[usize], real: &[f64], imag: &[f64]) -> Result<Self> {
        let mut gate = Self::new(GateType::Custom, qubits)?;
        match custom_matrix(real, imag, gate.qubits.len()) {
            Some(matrix) => gate.matrix = matrix,
            None => tracing::warn!(
                qubits = gate.qubits.len(),
                entries = real.len(),
                "custom gate matrix has wrong dimensions, using identity"
            ),
        }
        Ok(gate)
    }

    /// Structurally valid gate built without re-validation
    pub(crate) fn from_trusted(gate_type: GateType, qubits: &[QubitId]) -> Self {
        let parameters = GateParameters::new();
        let matrix = synthesize(&gate_type, &parameters, qubits.len());
        Self {
            gate_type,
            qubits: qubits.iter().copied().collect(),
            parameters,
            matrix,
            fidelity: 1.0,
        }
    }

    /// Return a copy with a different fidelity
    pub fn with_fidelity(mut self, fidelity: f64) -> Result<Self> {
        if !(fidelity > 0.0 && fidelity <= 1.0) {
            return Err(QuantumError::invalid_argument(format!(
                "gate fidelity must be in (0, 1], got {fidelity}"
            )));
        }
        self.fidelity = fidelity;
        Ok(self)
    }

    #[inline]
    pub fn gate_type(&self) -> &GateType {
        &self.gate_type
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.gate_type.name()
    }

    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    pub fn parameters(&self) -> &GateParameters {
        &self.parameters
    }

    pub fn parameter(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).copied()
    }

    /// Rotation angle, `None` for non-rotation gates
    pub fn angle(&self) -> Option<f64> {
        self.gate_type
            .angle_key()
            .map(|key| self.parameter(key).unwrap_or(0.0))
    }

    pub fn matrix(&self) -> &GateMatrix {
        &self.matrix
    }

    #[inline]
    pub fn fidelity(&self) -> f64 {
        self.fidelity
    }

    pub fn is_rotation(&self) -> bool {
        self.gate_type.is_rotation()
    }

    pub fn is_unitary(&self) -> bool {
        self.matrix.is_unitary(EPSILON)
    }

    pub fn is_controlled(&self) -> bool {
        self.gate_type.is_controlled()
    }

    pub fn control_qubits(&self) -> &[QubitId] {
        &self.qubits[..self.gate_type.num_controls()]
    }

    pub fn target_qubits(&self) -> &[QubitId] {
        &self.qubits[self.gate_type.num_controls()..]
    }

    pub fn shares_qubits(&self, other: &QuantumGate) -> bool {
        self.qubits.iter().any(|q| other.qubits.contains(q))
    }

    /// Execution time in nanoseconds
    ///
    /// A `"gate_time"` parameter overrides the per-arity default.
    pub fn gate_time(&self) -> f64 {
        if let Some(t) = self.parameter(GATE_TIME_KEY) {
            return t;
        }
        if self.is_rotation() {
            return 30.0;
        }
        match self.qubits.len() {
            1 => 20.0,
            2 => 200.0,
            3 => 1000.0,
            _ => 50.0,
        }
    }

    /// Adjoint gate
    ///
    /// Rotations negate their angle, `S`/`T` swap with their daggers and
    /// self-inverse gates are returned unchanged. Any other gate becomes a
    /// custom gate carrying the conjugate-transposed matrix.
    pub fn inverse(&self) -> QuantumGate {
        if let Some(key) = self.gate_type.angle_key() {
            let mut inv = self.clone();
            let angle = self.angle().unwrap_or(0.0);
            inv.parameters.insert(key.to_string(), -angle);
            inv.matrix = synthesize(&inv.gate_type, &inv.parameters, inv.qubits.len());
            return inv;
        }
        match self.gate_type.adjoint() {
            Some(adjoint) => {
                let mut inv = self.clone();
                inv.gate_type = adjoint;
                inv.matrix = synthesize(&inv.gate_type, &inv.parameters, inv.qubits.len());
                inv
            }
            None => {
                let mut inv = self.clone();
                inv.gate_type = GateType::Custom;
                inv.matrix = self.matrix.dagger();
                inv
            }
        }
    }

    /// Whether `other` is this gate's adjoint on the same qubits
    pub fn is_inverse_of(&self, other: &QuantumGate) -> bool {
        if self.qubits != other.qubits {
            return false;
        }
        if self.gate_type == other.gate_type && self.gate_type.is_self_inverse() {
            return true;
        }
        if self.gate_type.is_rotation() && self.gate_type == other.gate_type {
            let sum = self.angle().unwrap_or(0.0) + other.angle().unwrap_or(0.0);
            return sum.abs() < EPSILON;
        }
        matches!(
            (&self.gate_type, &other.gate_type),
            (GateType::S, GateType::Sdg)
                | (GateType::Sdg, GateType::S)
                | (GateType::T, GateType::Tdg)
                | (GateType::Tdg, GateType::T)
        )
    }

    /// Copy with fidelity scaled by `1 - noise_level`
    ///
    /// `noise_level` is clamped to `[0, 1)` so the result stays positive.
    pub fn with_noise(&self, noise_level: f64) -> QuantumGate {
        let level = noise_level.clamp(0.0, 1.0 - f64::EPSILON);
        let mut noisy = self.clone();
        noisy.fidelity = self.fidelity * (1.0 - level);
        noisy
    }

    /// Conservative commutation test
    ///
    /// Gates on disjoint qubits commute, as do identical gate kinds on the same
    /// qubits and single-qubit gates sharing a Pauli axis. Everything else is
    /// assumed not to commute.
    pub fn commutes(&self, other: &QuantumGate) -> bool {
        if !self.shares_qubits(other) {
            return true;
        }
        if self.gate_type == other.gate_type && self.qubits == other.qubits {
            return match self.gate_type {
                GateType::Custom | GateType::Opaque(_) => {
                    self.matrix.approx_eq(&other.matrix, EPSILON)
                }
                _ => true,
            };
        }
        self.qubits.len() == 1
            && self.qubits == other.qubits
            && matches!(
                (self.gate_type.pauli_axis(), other.gate_type.pauli_axis()),
                (Some(a), Some(b)) if a == b
            )
    }

    /// Expansion into `{h, t, tdg, cnot}` plus any other single-qubit gate
    ///
    /// Toffoli becomes the standard 15-gate Clifford+T network, CZ becomes
    /// `H·CNOT·H`, SWAP three CNOTs and Fredkin `CNOT·Toffoli·CNOT` (with the
    /// Toffoli expanded). Every other gate decomposes to itself.
    pub fn decomposition(&self) -> Vec<QuantumGate> {
        let q = self.qubits.as_slice();
        match self.gate_type {
            GateType::Toffoli => toffoli_network(q[0], q[1], q[2]),
            GateType::Cz => vec![
                Self::from_trusted(GateType::H, &[q[1]]),
                Self::from_trusted(GateType::Cnot, &[q[0], q[1]]),
                Self::from_trusted(GateType::H, &[q[1]]),
            ],
            GateType::Swap => vec![
                Self::from_trusted(GateType::Cnot, &[q[0], q[1]]),
                Self::from_trusted(GateType::Cnot, &[q[1], q[0]]),
                Self::from_trusted(GateType::Cnot, &[q[0], q[1]]),
            ],
            GateType::Fredkin => {
                let mut gates = vec![Self::from_trusted(GateType::Cnot, &[q[2], q[1]])];
                gates.extend(toffoli_network(q[0], q[1], q[2]));
                gates.push(Self::from_trusted(GateType::Cnot, &[q[2], q[1]]));
                gates
            }
            _ => vec![self.clone()],
        }
    }
}

/// Clifford+T realisation of a Toffoli with controls `a`, `b` and target `c`
pub fn toffoli_network(a: QubitId, b: QubitId, c: QubitId) -> Vec<QuantumGate> {
    let one = |gate_type, q| QuantumGate::from_trusted(gate_type, &[q]);
    let cx = |control, target| QuantumGate::from_trusted(GateType::Cnot, &[control, target]);
    vec![
        one(GateType::H, c),
        cx(b, c),
        one(GateType::Tdg, c),
        cx(a, c),
        one(GateType::T, c),
        cx(b, c),
        one(GateType::Tdg, c),
        cx(a, c),
        one(GateType::T, b),
        one(GateType::T, c),
        one(GateType::H, c),
        cx(a, b),
        one(GateType::T, a),
        one(GateType::Tdg, b),
        cx(a, b),
    ]
}

fn validate_qubits(gate_type: &GateType, qubits: &[QubitId]) -> Result<()> {
    match gate_type.arity() {
        Some(expected) if expected != qubits.len() => {
            return Err(QuantumError::invalid_qubit_count(
                gate_type.name(),
                expected,
                qubits.len(),
            ));
        }
        None if qubits.is_empty() => {
            return Err(QuantumError::invalid_qubit_count(gate_type.name(), 1, 0));
        }
        _ => {}
    }

    for (i, q) in qubits.iter().enumerate() {
        if qubits[i + 1..].contains(q) {
            return Err(QuantumError::DuplicateQubit(*q));
        }
    }
    Ok(())
}

impl fmt::Display for QuantumGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{q}")?;
        }
        write!(f, ")")?;
        if !self.parameters.is_empty() {
            write!(f, " {{")?;
            for (i, (k, v)) in self.parameters.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v:.4}")?;
            }
            write!(f, "}}")?;
        }
        Ok(())
    }
}
