//! Inverse-pair cancellation
//!
//! For each gate, scan a short window ahead for its inverse on the same
//! qubits. Gates in between must commute with it, so the scan stops at the
//! first one that does not.

use crate::passes::OptimizationPass;
use qsynth_core::{QuantumGate, Result};

#[derive(Debug, Clone)]
pub struct InverseCancellation {
    lookahead: usize,
}

impl Default for InverseCancellation {
    fn default() -> Self {
        Self { lookahead: 4 }
    }
}

impl InverseCancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many following gates are inspected
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    fn find_partner(&self, gates: &[QuantumGate], i: usize) -> Option<usize> {
        let end = (i + 1 + self.lookahead).min(gates.len());
        for j in i + 1..end {
            if gates[i].is_inverse_of(&gates[j]) {
                return Some(j);
            }
            if !gates[i].commutes(&gates[j]) {
                break;
            }
        }
        None
    }
}

impl OptimizationPass for InverseCancellation {
    fn name(&self) -> &str {
        "inverse_cancellation"
    }

    fn apply(&self, gates: &mut Vec<QuantumGate>) -> Result<bool> {
        let mut modified = false;
        let mut i = 0;
        while i < gates.len() {
            match self.find_partner(gates, i) {
                Some(j) => {
                    tracing::trace!(gate = %gates[i], position = i, partner = j, "cancelling inverse pair");
                    gates.remove(j);
                    gates.remove(i);
                    modified = true;
                }
                None => i += 1,
            }
        }
        Ok(modified)
    }

    fn description(&self) -> Option<&str> {
        Some("Removes gate pairs that multiply to the identity")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsynth_core::GateType;

    fn gate(t: GateType, q: &[usize]) -> QuantumGate {
        QuantumGate::new(t, q).unwrap()
    }

    #[test]
    fn test_adjacent_self_inverse() {
        let mut gates = vec![gate(GateType::H, &[0]), gate(GateType::H, &[0])];
        assert!(InverseCancellation::new().apply(&mut gates).unwrap());
        assert!(gates.is_empty());
    }

    #[test]
    fn test_cancels_across_commuting_gates() {
        let mut gates = vec![
            gate(GateType::Z, &[0]),
            gate(GateType::X, &[1]),
            gate(GateType::S, &[0]),
            gate(GateType::Z, &[0]),
        ];
        InverseCancellation::new().apply(&mut gates).unwrap();
        let names: Vec<&str> = gates.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["x", "s"]);
    }

    #[test]
    fn test_blocked_by_non_commuting_gate() {
        let mut gates = vec![
            gate(GateType::X, &[0]),
            gate(GateType::H, &[0]),
            gate(GateType::X, &[0]),
        ];
        assert!(!InverseCancellation::new().apply(&mut gates).unwrap());
        assert_eq!(gates.len(), 3);
    }

    #[test]
    fn test_lookahead_window() {
        let mut gates = vec![gate(GateType::X, &[0])];
        gates.extend((1..=4).map(|q| gate(GateType::H, &[q])));
        gates.push(gate(GateType::X, &[0]));
        let mut short = gates.clone();
        assert!(!InverseCancellation::new().apply(&mut short).unwrap());
        assert!(InverseCancellation::new()
            .with_lookahead(5)
            .apply(&mut gates)
            .unwrap());
    }

    #[test]
    fn test_rotation_pair_and_phase_pair() {
        let mut gates = vec![
            QuantumGate::rotation(GateType::Ry, 0, 0.8).unwrap(),
            QuantumGate::rotation(GateType::Ry, 0, -0.8).unwrap(),
            gate(GateType::T, &[1]),
            gate(GateType::Tdg, &[1]),
        ];
        InverseCancellation::new().apply(&mut gates).unwrap();
        assert!(gates.is_empty());
    }

    #[test]
    fn test_cnot_direction_matters() {
        let mut gates = vec![gate(GateType::Cnot, &[0, 1]), gate(GateType::Cnot, &[1, 0])];
        assert!(!InverseCancellation::new().apply(&mut gates).unwrap());
    }
}
