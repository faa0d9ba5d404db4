//! Circuit optimization for qsynth
//!
//! This crate rewrites [`qsynth_core::QuantumCircuit`] gate lists with a
//! fixed sequence of passes:
//! - Dead gate elimination: identities and zero-angle rotations
//! - Rotation fusion: runs of same-axis rotations on one qubit
//! - Inverse cancellation: gate pairs that multiply to the identity
//! - Commutation reordering: narrow gates moved ahead of wider commuting ones
//!
//! The [`Optimizer`] repeats the sequence until nothing changes, so optimizing
//! an optimized circuit is a no-op.

pub mod passes;
pub mod pipeline;

pub use passes::{OptimizationPass, OptimizationResult, PassStatistics};
pub use pipeline::{Optimize, Optimized, Optimizer, PipelineConfig};
