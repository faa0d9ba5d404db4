//! Commutation-based reordering
//!
//! One bubble pass over adjacent pairs: when the earlier gate touches strictly
//! more qubits than the later one and the two commute, they are swapped. This
//! pulls narrow gates forward so later passes see them next to their peers.

use crate::passes::OptimizationPass;
use qsynth_core::{QuantumGate, Result};

#[derive(Debug, Clone, Default)]
pub struct CommutationReordering;

impl CommutationReordering {
    pub fn new() -> Self {
        Self
    }
}

impl OptimizationPass for CommutationReordering {
    fn name(&self) -> &str {
        "commutation_reordering"
    }

    fn apply(&self, gates: &mut Vec<QuantumGate>) -> Result<bool> {
        let mut modified = false;
        for i in 1..gates.len() {
            let (earlier, later) = (&gates[i - 1], &gates[i]);
            if earlier.num_qubits() > later.num_qubits() && earlier.commutes(later) {
                gates.swap(i - 1, i);
                modified = true;
            }
        }
        Ok(modified)
    }

    fn description(&self) -> Option<&str> {
        Some("Moves lower-arity gates ahead of commuting wider gates")
    }
}
