//! Rotation fusion
//!
//! Consecutive rotations of the same axis on the same qubit collapse into one
//! rotation whose parameters are the sums of theirs.
//!
//! # Algorithm
//! 1. Keep one pending rotation per qubit
//! 2. A rotation of the pending axis merges into it; a different axis flushes
//!    the pending one first
//! 3. Any other gate flushes every pending rotation in qubit order, then is
//!    emitted itself
//!
//! Merged gates multiply fidelities and keep the first gate's `gate_time`.

use crate::passes::OptimizationPass;
use qsynth_core::{QuantumGate, QubitId, Result, GATE_TIME_KEY};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct RotationFusion;

impl RotationFusion {
    pub fn new() -> Self {
        Self
    }

    fn merge(first: &QuantumGate, second: &QuantumGate) -> Result<QuantumGate> {
        let mut parameters = first.parameters().clone();
        for (key, value) in second.parameters() {
            if key == GATE_TIME_KEY {
                parameters.entry(key.clone()).or_insert(*value);
            } else {
                *parameters.entry(key.clone()).or_insert(0.0) += value;
            }
        }
        let qubits = [first.qubits()[0].index()];
        QuantumGate::with_parameters(first.gate_type().clone(), &qubits, parameters)?
            .with_fidelity(first.fidelity() * second.fidelity())
    }
}

impl OptimizationPass for RotationFusion {
    fn name(&self) -> &str {
        "rotation_fusion"
    }

    fn apply(&self, gates: &mut Vec<QuantumGate>) -> Result<bool> {
        let mut fused = Vec::with_capacity(gates.len());
        let mut pending: BTreeMap<QubitId, QuantumGate> = BTreeMap::new();

        for gate in gates.iter() {
            if !gate.is_rotation() {
                fused.extend(std::mem::take(&mut pending).into_values());
                fused.push(gate.clone());
                continue;
            }

            let qubit = gate.qubits()[0];
            let next = match pending.remove(&qubit) {
                Some(prev) if prev.gate_type() == gate.gate_type() => Self::merge(&prev, gate)?,
                Some(prev) => {
                    fused.push(prev);
                    gate.clone()
                }
                None => gate.clone(),
            };
            pending.insert(qubit, next);
        }
        fused.extend(pending.into_values());

        let modified = fused != *gates;
        *gates = fused;
        Ok(modified)
    }

    fn description(&self) -> Option<&str> {
        Some("Merges runs of same-axis rotations on a qubit")
    }
}
