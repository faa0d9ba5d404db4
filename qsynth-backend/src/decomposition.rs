//! Native-gate decomposition
//!
//! Only gates with a known expansion are rewritten: Toffoli becomes the
//! 15-gate H/CNOT/T/T† network and CZ becomes `H·CNOT·H` on the target.
//! Anything else that is not native passes through untouched.

use crate::target::TranspileTarget;
use qsynth_core::{GateType, QuantumGate};

pub struct GateDecomposer<'a> {
    target: &'a TranspileTarget,
}

impl<'a> GateDecomposer<'a> {
    pub fn new(target: &'a TranspileTarget) -> Self {
        Self { target }
    }

    /// Whether the target lacks `gate` and a rule exists for it
    pub fn needs_decomposition(&self, gate: &QuantumGate) -> bool {
        !self.target.is_native(gate.gate_type())
            && matches!(gate.gate_type(), GateType::Toffoli | GateType::Cz)
    }

    pub fn decompose(&self, gate: &QuantumGate) -> Vec<QuantumGate> {
        if self.needs_decomposition(gate) {
            gate.decomposition()
        } else {
            vec![gate.clone()]
        }
    }

    /// Decompose every gate, returning the new list and how many were expanded
    pub fn decompose_all(&self, gates: &[QuantumGate]) -> (Vec<QuantumGate>, usize) {
        let mut expanded = 0;
        let mut out = Vec::with_capacity(gates.len());
        for gate in gates {
            if self.needs_decomposition(gate) {
                expanded += 1;
                out.extend(gate.decomposition());
            } else {
                out.push(gate.clone());
            }
        }
        (out, expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toffoli_expanded() {
        let target = TranspileTarget::default();
        let ccx = QuantumGate::new(GateType::Toffoli, &[0, 1, 2]).unwrap();
        let parts = GateDecomposer::new(&target).decompose(&ccx);
        assert_eq!(parts.len(), 15);
        assert!(parts
            .iter()
            .all(|g| matches!(g.name(), "h" | "cnot" | "t" | "tdg")));
    }

    #[test]
    fn test_cz_expanded_on_target() {
        let target = TranspileTarget::default();
        let cz = QuantumGate::new(GateType::Cz, &[3, 1]).unwrap();
        let parts = GateDecomposer::new(&target).decompose(&cz);
        let names: Vec<&str> = parts.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["h", "cnot", "h"]);
        assert_eq!(parts[0].qubits()[0].index(), 1);
        assert_eq!(parts[1].control_qubits()[0].index(), 3);
    }

    #[test]
    fn test_unknown_non_native_passes_through() {
        let target = TranspileTarget::default();
        let gates = vec![
            QuantumGate::new(GateType::Swap, &[0, 1]).unwrap(),
            QuantumGate::new(GateType::Y, &[0]).unwrap(),
        ];
        let (out, expanded) = GateDecomposer::new(&target).decompose_all(&gates);
        assert_eq!(out, gates);
        assert_eq!(expanded, 0);
    }

    #[test]
    fn test_native_toffoli_kept() {
        let target = TranspileTarget::new().with_native_gates(["toffoli"]);
        let ccx = QuantumGate::new(GateType::Toffoli, &[0, 1, 2]).unwrap();
        assert_eq!(GateDecomposer::new(&target).decompose(&ccx).len(), 1);
    }
}
