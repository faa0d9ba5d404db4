//! Core types for the qsynth circuit and optimization toolkit
//!
//! This crate provides the building blocks every other qsynth crate uses:
//! - [`ComplexNumber`] helpers on top of `num_complex`
//! - [`GateMatrix`]: dense unitary storage
//! - [`GateType`] and [`synthesize`]: the gate catalog
//! - [`QuantumGate`]: an immutable gate with its unitary
//! - [`QuantumCircuit`]: an ordered, validated gate list with measurements
//!
//! # Example
//! ```
//! use qsynth_core::QuantumCircuit;
//!
//! let mut circuit = QuantumCircuit::new(2);
//! circuit.h(0).unwrap().cnot(0, 1).unwrap();
//! circuit.measure_all();
//! assert_eq!(circuit.metrics().cx_count, 1);
//! ```

pub mod catalog;
pub mod circuit;
pub mod complex;
pub mod error;
pub mod gate;
pub mod matrix;
pub mod qubit;

pub use catalog::{
    custom_matrix, synthesize, GateParameters, GateType, PauliAxis, FIDELITY_KEY, GATE_TIME_KEY,
};
pub use circuit::{CircuitMetrics, MeasurementBasis, MeasurementOperation, QuantumCircuit};
pub use complex::{Complex64, ComplexExt, ComplexNumber};
pub use error::QuantumError;
pub use gate::{toffoli_network, QuantumGate, EPSILON};
pub use matrix::GateMatrix;
pub use qubit::{qubit_list, QubitId, QubitList};

/// Type alias for results in qsynth
pub type Result<T> = std::result::Result<T, QuantumError>;
