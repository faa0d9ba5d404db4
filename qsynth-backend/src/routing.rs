//! SWAP insertion for limited connectivity
//!
//! Every two-qubit gate whose qubits are not adjacent gets one SWAP per
//! intermediate hop of the shortest path between them, inserted just before
//! it. The gate itself is kept unchanged and no relabelling takes place.

use crate::connectivity::ConnectivityGraph;
use crate::{BackendError, Result};
use qsynth_core::{GateType, QuantumError, QuantumGate};

/// Counters from one routing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingStats {
    /// Two-qubit gates that needed SWAPs
    pub gates_routed: usize,
    pub swaps_inserted: usize,
}

/// Router for handling qubit connectivity constraints
pub struct Router<'a> {
    connectivity: &'a ConnectivityGraph,
}

impl<'a> Router<'a> {
    pub fn new(connectivity: &'a ConnectivityGraph) -> Self {
        Self { connectivity }
    }

    /// SWAPs that walk `from` along the shortest path until it neighbours `to`
    ///
    /// # Errors
    /// `NoPath` when the graph does not link the two qubits
    pub fn swap_chain(&self, from: usize, to: usize) -> Result<Vec<(usize, usize)>> {
        if self.connectivity.are_connected(from, to) {
            return Ok(Vec::new());
        }
        let path = self
            .connectivity
            .shortest_path(from, to)
            .ok_or(BackendError::NoPath { from, to })?;
        Ok(path
            .windows(2)
            .take(path.len().saturating_sub(2))
            .map(|w| (w[0], w[1]))
            .collect())
    }

    /// Route a gate list for a circuit of `num_qubits` qubits
    pub fn route(
        &self,
        gates: &[QuantumGate],
        num_qubits: usize,
    ) -> Result<(Vec<QuantumGate>, RoutingStats)> {
        let mut routed = Vec::with_capacity(gates.len());
        let mut stats = RoutingStats::default();

        for gate in gates {
            if gate.num_qubits() == 2 {
                let (a, b) = (gate.qubits()[0].index(), gate.qubits()[1].index());
                let chain = self.swap_chain(a, b)?;
                if !chain.is_empty() {
                    tracing::trace!(gate = %gate, swaps = chain.len(), "routing non-adjacent gate");
                    stats.gates_routed += 1;
                    stats.swaps_inserted += chain.len();
                }
                for (p, q) in chain {
                    if let Some(&bad) = [p, q].iter().find(|&&x| x >= num_qubits) {
                        return Err(QuantumError::invalid_qubit(bad, num_qubits).into());
                    }
                    routed.push(QuantumGate::new(GateType::Swap, &[p, q])?);
                }
            }
            routed.push(gate.clone());
        }

        Ok((routed, stats))
    }
}
