//! Quantum state model and state-vector simulation for qsynth
//!
//! - [`QuantumState`]: amplitude vector with probability, entropy, coherence,
//!   concurrence, partial trace and Schmidt analysis
//! - [`StateVectorSimulator`]: runs a [`qsynth_core::QuantumCircuit`] and
//!   samples its measurements
//!
//! # Example
//!
//! ```
//! use qsynth_state::QuantumState;
//!
//! let product = QuantumState::basis(1, 1).tensor_product(&QuantumState::zero(1));
//! assert_eq!(product.num_qubits(), 2);
//! assert_eq!(product.probability(0b10), 1.0);
//! ```

pub mod error;
pub mod simulator;
pub mod state;

pub use error::{Result, StateError};
pub use simulator::{SimulationResult, SimulatorConfig, StateVectorSimulator};
pub use state::{QuantumState, SchmidtDecomposition, PROBABILITY_EPSILON};
