//! Circuit optimization pass trait and implementations

mod commutation_reordering;
mod dead_gate_elimination;
mod inverse_cancellation;
mod rotation_fusion;

pub use commutation_reordering::CommutationReordering;
pub use dead_gate_elimination::DeadGateElimination;
pub use inverse_cancellation::InverseCancellation;
pub use rotation_fusion::RotationFusion;

use qsynth_core::{QuantumGate, Result};

/// Trait for circuit optimization passes
///
/// A pass rewrites a gate list in place. Passes never see the circuit
/// itself, so registers, measurements and metadata are out of their reach.
///
/// # Example
/// ```
/// use qsynth_compiler::passes::OptimizationPass;
/// use qsynth_core::{QuantumGate, Result};
///
/// struct DropAll;
///
/// impl OptimizationPass for DropAll {
///     fn name(&self) -> &str {
///         "drop_all"
///     }
///
///     fn apply(&self, gates: &mut Vec<QuantumGate>) -> Result<bool> {
///         let modified = !gates.is_empty();
///         gates.clear();
///         Ok(modified)
///     }
/// }
/// ```
pub trait OptimizationPass: Send + Sync {
    /// The name of this optimization pass
    fn name(&self) -> &str;

    /// Rewrite `gates`
    ///
    /// # Returns
    /// * `Ok(true)` if the gate list was modified
    /// * `Ok(false)` if it was left untouched
    ///
    /// # Errors
    /// Returns an error if a rewritten gate cannot be constructed
    fn apply(&self, gates: &mut Vec<QuantumGate>) -> Result<bool>;

    /// Optional description of what this pass does
    fn description(&self) -> Option<&str> {
        None
    }
}

/// Accumulated statistics for one pass across pipeline iterations
#[derive(Debug, Clone, PartialEq)]
pub struct PassStatistics {
    pub pass_name: String,
    /// Number of times the pass was run
    pub applications: usize,
    /// Number of runs that modified the gate list
    pub modifications: usize,
    /// Total time spent in this pass (microseconds)
    pub time_us: u64,
}

impl PassStatistics {
    pub fn new(pass_name: impl Into<String>) -> Self {
        Self {
            pass_name: pass_name.into(),
            applications: 0,
            modifications: 0,
            time_us: 0,
        }
    }

    pub fn modified(&self) -> bool {
        self.modifications > 0
    }
}

/// Result of running an optimization pipeline
#[derive(Debug, Clone, Default)]
pub struct OptimizationResult {
    /// Whether any pass modified the circuit
    pub modified: bool,
    /// Statistics for each pass, in pipeline order
    pub pass_stats: Vec<PassStatistics>,
    /// Full sweeps over the pass list
    pub iterations: usize,
    pub gates_before: usize,
    pub gates_after: usize,
    /// Total optimization time (microseconds)
    pub total_time_us: u64,
}

impl OptimizationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add statistics for a pass
    pub fn add_pass_stats(&mut self, stats: PassStatistics) {
        self.modified |= stats.modified();
        self.pass_stats.push(stats);
    }

    pub fn gates_removed(&self) -> usize {
        self.gates_before.saturating_sub(self.gates_after)
    }
}
