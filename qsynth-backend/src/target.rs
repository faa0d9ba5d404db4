//! Transpilation targets

use crate::connectivity::ConnectivityGraph;
use qsynth_core::GateType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Gate names a target executes without decomposition by default
pub const DEFAULT_NATIVE_GATES: [&str; 5] = ["h", "rx", "ry", "rz", "cnot"];

/// Hardware description a circuit is transpiled for
///
/// Without a connectivity graph every qubit pair is treated as adjacent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspileTarget {
    #[serde(default)]
    pub connectivity: Option<ConnectivityGraph>,

    #[serde(default = "default_native_gates")]
    pub native_gates: BTreeSet<String>,
}

fn default_native_gates() -> BTreeSet<String> {
    DEFAULT_NATIVE_GATES.iter().map(|g| g.to_string()).collect()
}

impl Default for TranspileTarget {
    fn default() -> Self {
        Self {
            connectivity: None,
            native_gates: default_native_gates(),
        }
    }
}

impl TranspileTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connectivity(mut self, connectivity: ConnectivityGraph) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    /// Replace the native gate set; names are normalized through the catalog
    pub fn with_native_gates<I, S>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.native_gates = gates
            .into_iter()
            .map(|g| GateType::from(g.as_ref()).name().to_string())
            .collect();
        self
    }

    /// Membership test that also accepts aliases such as `cx`
    pub fn is_native(&self, gate_type: &GateType) -> bool {
        self.native_gates.contains(gate_type.name())
            || self
                .native_gates
                .iter()
                .any(|name| GateType::from(name.as_str()) == *gate_type)
    }

    /// Adjacency test, true for every pair when no graph is set
    pub fn are_adjacent(&self, q1: usize, q2: usize) -> bool {
        self.connectivity
            .as_ref()
            .map_or(true, |graph| graph.are_connected(q1, q2))
    }
}
