//! Connectivity-aware transpilation for qsynth circuits
//!
//! A [`TranspileTarget`] describes which qubit pairs can interact and which
//! gates are native. The [`Transpiler`] routes two-qubit gates across the
//! [`ConnectivityGraph`] with SWAP insertion and expands non-native Toffoli
//! and CZ gates.

pub mod connectivity;
pub mod decomposition;
pub mod error;
pub mod routing;
pub mod target;
pub mod transpiler;

pub use connectivity::ConnectivityGraph;
pub use decomposition::GateDecomposer;
pub use error::{BackendError, Result};
pub use routing::{Router, RoutingStats};
pub use target::{TranspileTarget, DEFAULT_NATIVE_GATES};
pub use transpiler::{Transpile, TranspileStats, Transpiled, Transpiler};
