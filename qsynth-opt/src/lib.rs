//! Combinatorial optimization on top of qsynth circuits
//!
//! - [`QuantumOptimizationProblem`]: typed problem data plus its QUBO/Ising
//!   encoding (MaxCut, TSP, portfolio, knapsack, vertex cover, graph
//!   colouring, SAT, raw QUBO)
//! - [`qaoa`]: QAOA circuit generation from given angles
//! - [`vqe`]: hardware-efficient ansatz generation
//! - [`grover`], [`qft`], [`hamiltonian`]: Grover search, Fourier transform
//!   and Trotterised time-evolution circuits
//! - [`features`]: classical data loading and a small classifier circuit
//! - [`evaluator`]: objective evaluation, exhaustive search and sample scoring
//! - [`annealer`]: classical simulated-annealing sampler
//! - [`batch`]: rayon fan-out over independent problems
//!
//! # Example
//! ```
//! use qsynth_opt::{ProblemData, QuantumOptimizationProblem};
//!
//! let problem = QuantumOptimizationProblem::new(ProblemData::max_cut(&[(0, 1), (1, 2)]));
//! let circuit = problem.generate_qaoa_circuit(&[0.4], &[0.7]).unwrap();
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.measurements().len(), 3);
//! ```

pub mod annealer;
pub mod batch;
pub mod encoders;
pub mod error;
pub mod evaluator;
pub mod features;
pub mod grover;
pub mod hamiltonian;
pub mod params;
pub mod problem;
pub mod qaoa;
pub mod qft;
pub mod qubo;
pub mod vqe;

pub use annealer::{AnnealResult, AnnealerConfig, SimulatedAnnealer};
pub use batch::{encode_batch, encode_parameters_batch, evaluate_batch};
pub use encoders::ProblemEncoding;
pub use error::{OptError, Result};
pub use evaluator::{best_from_counts, brute_force_minimum, sample_qaoa, ScoredSample, Solution};
pub use features::FeatureEncoding;
pub use hamiltonian::{Hamiltonian, Pauli, PauliTerm};
pub use params::{ParamValue, ParameterBag};
pub use problem::{Edge, Literal, ProblemData, ProblemType, QuantumOptimizationProblem};
pub use qaoa::{InitialState, QaoaConfig};
pub use qubo::{IsingModel, QuboMatrix};
