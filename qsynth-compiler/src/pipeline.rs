//! Optimization pipeline
//!
//! The [`Optimizer`] runs its passes in order over a copy of a circuit's gate
//! list, repeating the whole sequence until a sweep changes nothing.

use crate::passes::{
    CommutationReordering, DeadGateElimination, InverseCancellation, OptimizationPass,
    OptimizationResult, PassStatistics, RotationFusion,
};
use qsynth_core::{QuantumCircuit, Result};
use std::sync::Arc;
use std::time::Instant;

/// Configuration for the optimization pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of fixed-point sweeps
    pub max_iterations: usize,
    /// Whether to record per-pass timings
    pub enable_timing: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_iterations: 32,
            enable_timing: true,
        }
    }
}

impl PipelineConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_timing(mut self, enable: bool) -> Self {
        self.enable_timing = enable;
        self
    }
}

/// Optimized circuit together with the statistics of the run
#[derive(Debug, Clone)]
pub struct Optimized {
    pub circuit: QuantumCircuit,
    pub result: OptimizationResult,
}

/// Circuit optimizer
///
/// # Example
/// ```
/// use qsynth_compiler::Optimizer;
/// use qsynth_core::QuantumCircuit;
///
/// let mut circuit = QuantumCircuit::new(1);
/// circuit.rx(0, 0.3).unwrap().rx(0, -0.3).unwrap().h(0).unwrap();
///
/// let optimized = Optimizer::standard().optimize(&circuit).unwrap();
/// assert_eq!(optimized.len(), 1);
/// assert!(optimized.is_optimized());
/// assert_eq!(circuit.len(), 3);
/// ```
#[derive(Clone)]
pub struct Optimizer {
    config: PipelineConfig,
    passes: Vec<Arc<dyn OptimizationPass>>,
}

impl Optimizer {
    /// Optimizer with no passes
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            passes: Vec::new(),
        }
    }

    /// Dead-gate elimination, rotation fusion, inverse cancellation and
    /// commutation reordering, in that order
    pub fn standard() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Standard pass list with a custom configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        let mut optimizer = Self::new(config);
        optimizer.add_pass(Arc::new(DeadGateElimination::new()));
        optimizer.add_pass(Arc::new(RotationFusion::new()));
        optimizer.add_pass(Arc::new(InverseCancellation::new()));
        optimizer.add_pass(Arc::new(CommutationReordering::new()));
        optimizer
    }

    /// Passes are applied in the order they are added.
    pub fn add_pass(&mut self, pass: Arc<dyn OptimizationPass>) {
        self.passes.push(pass);
    }

    pub fn num_passes(&self) -> usize {
        self.passes.len()
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Optimize a copy of `circuit`
    pub fn optimize(&self, circuit: &QuantumCircuit) -> Result<QuantumCircuit> {
        self.run(circuit).map(|optimized| optimized.circuit)
    }

    /// Optimize a copy of `circuit`, returning per-pass statistics too
    ///
    /// The input is never modified. The output is marked optimized and
    /// records every pass that changed it.
    pub fn run(&self, circuit: &QuantumCircuit) -> Result<Optimized> {
        let start_time = Instant::now();
        let mut gates = circuit.gates().to_vec();
        let mut stats: Vec<PassStatistics> = self
            .passes
            .iter()
            .map(|p| PassStatistics::new(p.name()))
            .collect();
        let mut iterations = 0;

        for iteration in 0..self.config.max_iterations {
            let mut changed = false;
            for (pass, stat) in self.passes.iter().zip(stats.iter_mut()) {
                let pass_start = self.config.enable_timing.then(Instant::now);
                let modified = pass.apply(&mut gates)?;

                stat.applications += 1;
                if modified {
                    stat.modifications += 1;
                }
                if let Some(t) = pass_start {
                    stat.time_us += t.elapsed().as_micros() as u64;
                }
                tracing::trace!(
                    pass = pass.name(),
                    iteration,
                    modified,
                    gates = gates.len(),
                    "pass applied"
                );
                changed |= modified;
            }
            iterations = iteration + 1;

            // Fixed point
            if !changed {
                break;
            }
        }

        let applied: Vec<String> = stats
            .iter()
            .filter(|s| s.modified())
            .map(|s| s.pass_name.clone())
            .collect();

        let mut result = OptimizationResult::new();
        result.iterations = iterations;
        result.gates_before = circuit.len();
        result.gates_after = gates.len();
        for stat in stats {
            result.add_pass_stats(stat);
        }
        result.total_time_us = start_time.elapsed().as_micros() as u64;

        tracing::debug!(
            gates_before = result.gates_before,
            gates_after = result.gates_after,
            iterations,
            passes = ?applied,
            "circuit optimized"
        );

        let optimized = circuit.with_gates(gates).into_optimized(applied);
        Ok(Optimized {
            circuit: optimized,
            result,
        })
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::standard()
    }
}

/// Run the standard pipeline directly on a circuit
pub trait Optimize {
    fn optimize(&self) -> Result<QuantumCircuit>;
}

impl Optimize for QuantumCircuit {
    fn optimize(&self) -> Result<QuantumCircuit> {
        Optimizer::standard().optimize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qsynth_core::{GateType, QuantumGate};

    #[test]
    fn test_standard_pass_order() {
        assert_eq!(
            Optimizer::standard().pass_names(),
            vec![
                "dead_gate_elimination",
                "rotation_fusion",
                "inverse_cancellation",
                "commutation_reordering"
            ]
        );
    }

    #[test]
    fn test_empty_circuit() {
        let circuit = QuantumCircuit::new(2);
        let run = Optimizer::standard().run(&circuit).unwrap();
        assert!(run.circuit.is_empty());
        assert!(run.circuit.is_optimized());
        assert!(run.circuit.applied_passes().is_empty());
        assert_eq!(run.result.iterations, 1);
        assert!(!run.result.modified);
    }

    #[test]
    fn test_iterates_until_fixed_point() {
        // the fused zero-angle rotation is only dropped on the next sweep
        let mut circuit = QuantumCircuit::new(2);
        circuit
            .h(0)
            .unwrap()
            .rx(1, 0.2)
            .unwrap()
            .rx(1, -0.2)
            .unwrap()
            .h(0)
            .unwrap();
        let run = Optimizer::standard().run(&circuit).unwrap();
        assert!(run.circuit.is_empty());
        assert!(run.result.iterations >= 2);
        assert_eq!(run.result.gates_removed(), 4);
    }

    #[test]
    fn test_fidelity_recomputed() {
        let mut circuit = QuantumCircuit::new(1);
        circuit
            .add_gate(QuantumGate::new(GateType::X, &[0]).unwrap().with_noise(0.5))
            .unwrap()
            .add_gate(QuantumGate::new(GateType::X, &[0]).unwrap())
            .unwrap()
            .h(0)
            .unwrap();
        assert_relative_eq!(circuit.fidelity(), 0.5);
        let optimized = circuit.optimize().unwrap();
        assert_eq!(optimized.len(), 1);
        assert_relative_eq!(optimized.fidelity(), 1.0);
    }

    #[test]
    fn test_iteration_cap() {
        let mut circuit = QuantumCircuit::new(1);
        circuit.identity(0).unwrap();
        let optimizer = Optimizer::with_config(PipelineConfig::default().with_max_iterations(1));
        let run = optimizer.run(&circuit).unwrap();
        assert_eq!(run.result.iterations, 1);
        assert!(run.circuit.is_empty());
    }
}
