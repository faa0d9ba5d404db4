//! qsynth: quantum circuit synthesis, optimization and QUBO encoding
//!
//! This crate re-exports the workspace:
//! - [`core`]: gates, matrices and circuits
//! - [`state`]: state vectors and the state-vector simulator
//! - [`compiler`]: the rewrite-pass optimization pipeline
//! - [`backend`]: connectivity routing and native-gate transpilation
//! - [`opt`]: combinatorial encoders, QAOA/VQE generators and evaluation
//!
//! # Example
//! ```
//! use qsynth::prelude::*;
//!
//! let mut circuit = QuantumCircuit::new(2);
//! circuit.h(0).unwrap().cnot(0, 1).unwrap();
//!
//! let state = StateVectorSimulator::new(SimulatorConfig::default())
//!     .statevector(&circuit)
//!     .unwrap();
//! assert!((state.concurrence() - 1.0).abs() < 1e-10);
//!
//! let routed = circuit
//!     .transpile(&TranspileTarget::new().with_connectivity(ConnectivityGraph::linear_chain(2)))
//!     .unwrap();
//! assert_eq!(routed.len(), 2);
//! ```

pub use qsynth_backend as backend;
pub use qsynth_compiler as compiler;
pub use qsynth_core as core;
pub use qsynth_opt as opt;
pub use qsynth_state as state;

/// Commonly used types and extension traits
pub mod prelude {
    pub use qsynth_backend::{
        BackendError, ConnectivityGraph, Transpile, Transpiled, Transpiler, TranspileTarget,
    };
    pub use qsynth_compiler::{Optimize, Optimizer, PipelineConfig};
    pub use qsynth_core::{
        GateParameters, GateType, QuantumCircuit, QuantumError, QuantumGate, QubitId,
    };
    pub use qsynth_opt::{
        FeatureEncoding, Hamiltonian, OptError, ParameterBag, ProblemData, ProblemType, QaoaConfig,
        QuantumOptimizationProblem, QuboMatrix,
    };
    pub use qsynth_state::{QuantumState, SimulatorConfig, StateError, StateVectorSimulator};
}
