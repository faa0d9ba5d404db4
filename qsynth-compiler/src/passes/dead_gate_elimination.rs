//! Dead gate elimination
//!
//! Drops gates that act as the identity: explicit `identity` gates and
//! rotations whose angle magnitude is below [`EPSILON`].

use crate::passes::OptimizationPass;
use qsynth_core::{GateType, QuantumGate, Result, EPSILON};

#[derive(Debug, Clone, Default)]
pub struct DeadGateElimination;

impl DeadGateElimination {
    pub fn new() -> Self {
        Self
    }

    fn is_dead(gate: &QuantumGate) -> bool {
        gate.gate_type() == &GateType::Identity
            || gate.angle().is_some_and(|angle| angle.abs() < EPSILON)
    }
}

impl OptimizationPass for DeadGateElimination {
    fn name(&self) -> &str {
        "dead_gate_elimination"
    }

    fn apply(&self, gates: &mut Vec<QuantumGate>) -> Result<bool> {
        let before = gates.len();
        gates.retain(|g| !Self::is_dead(g));
        Ok(gates.len() != before)
    }

    fn description(&self) -> Option<&str> {
        Some("Removes identity gates and zero-angle rotations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_identity_and_zero_rotations() {
        let mut gates = vec![
            QuantumGate::new(GateType::Identity, &[0]).unwrap(),
            QuantumGate::rotation(GateType::Rx, 0, 1e-12).unwrap(),
            QuantumGate::new(GateType::H, &[0]).unwrap(),
            QuantumGate::rotation(GateType::Rz, 1, 0.5).unwrap(),
        ];
        let modified = DeadGateElimination::new().apply(&mut gates).unwrap();
        assert!(modified);
        let names: Vec<&str> = gates.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["h", "rz"]);
    }

    #[test]
    fn test_no_change_reported() {
        let mut gates = vec![QuantumGate::new(GateType::X, &[0]).unwrap()];
        assert!(!DeadGateElimination::new().apply(&mut gates).unwrap());
        assert_eq!(gates.len(), 1);
    }
}
