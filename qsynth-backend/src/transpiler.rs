//! Circuit transpilation for a target
//!
//! Two stages run in order:
//! 1. Routing: SWAP insertion for non-adjacent two-qubit gates
//! 2. Decomposition: expansion of non-native gates with a known rule

use crate::decomposition::GateDecomposer;
use crate::routing::{Router, RoutingStats};
use crate::target::TranspileTarget;
use crate::Result;
use qsynth_core::QuantumCircuit;

/// Counters from one transpilation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranspileStats {
    pub gates_before: usize,
    pub gates_after: usize,
    pub routing: RoutingStats,
    pub gates_decomposed: usize,
}

/// Transpiled circuit and its statistics
#[derive(Debug, Clone)]
pub struct Transpiled {
    pub circuit: QuantumCircuit,
    pub stats: TranspileStats,
}

/// Transpiler for converting circuits to a target's connectivity and gate set
///
/// # Example
/// ```
/// use qsynth_backend::{ConnectivityGraph, TranspileTarget, Transpiler};
/// use qsynth_core::QuantumCircuit;
///
/// let mut circuit = QuantumCircuit::new(3);
/// circuit.cnot(0, 2).unwrap();
///
/// let target = TranspileTarget::default().with_connectivity(ConnectivityGraph::linear_chain(3));
/// let routed = Transpiler::new(target).transpile(&circuit).unwrap();
/// assert_eq!(routed.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    target: TranspileTarget,
}

impl Transpiler {
    pub fn new(target: TranspileTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &TranspileTarget {
        &self.target
    }

    pub fn transpile(&self, circuit: &QuantumCircuit) -> Result<QuantumCircuit> {
        self.run(circuit).map(|t| t.circuit)
    }

    /// Transpile a copy of `circuit`, returning statistics too
    pub fn run(&self, circuit: &QuantumCircuit) -> Result<Transpiled> {
        let mut stats = TranspileStats {
            gates_before: circuit.len(),
            ..TranspileStats::default()
        };

        let routed = match &self.target.connectivity {
            Some(graph) => {
                let (gates, routing) =
                    Router::new(graph).route(circuit.gates(), circuit.num_qubits())?;
                stats.routing = routing;
                gates
            }
            None => circuit.gates().to_vec(),
        };

        let (gates, decomposed) = GateDecomposer::new(&self.target).decompose_all(&routed);
        stats.gates_decomposed = decomposed;
        stats.gates_after = gates.len();

        tracing::debug!(
            gates_before = stats.gates_before,
            gates_after = stats.gates_after,
            swaps = stats.routing.swaps_inserted,
            decomposed,
            "circuit transpiled"
        );

        Ok(Transpiled {
            circuit: circuit.with_gates(gates),
            stats,
        })
    }
}

/// Transpile a circuit directly
pub trait Transpile {
    fn transpile(&self, target: &TranspileTarget) -> Result<QuantumCircuit>;
}

impl Transpile for QuantumCircuit {
    fn transpile(&self, target: &TranspileTarget) -> Result<QuantumCircuit> {
        Transpiler::new(target.clone()).transpile(self)
    }
}
