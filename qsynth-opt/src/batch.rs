//! Parallel encoding and scoring of independent inputs

use crate::params::ParameterBag;
use crate::problem::{ProblemData, ProblemType, QuantumOptimizationProblem};
use rayon::prelude::*;

/// Encode independent problems across the rayon pool, preserving order
pub fn encode_batch(problems: Vec<ProblemData>) -> Vec<QuantumOptimizationProblem> {
    problems
        .into_par_iter()
        .map(QuantumOptimizationProblem::new)
        .collect()
}

/// Convert and encode keyed inputs in parallel
///
/// Entries with missing fields come back unencoded, as with
/// [`QuantumOptimizationProblem::from_parameters`].
pub fn encode_parameters_batch(
    requests: &[(ProblemType, ParameterBag)],
) -> Vec<QuantumOptimizationProblem> {
    requests
        .par_iter()
        .map(|(problem_type, bag)| QuantumOptimizationProblem::from_parameters(*problem_type, bag))
        .collect()
}

/// Objective of each candidate assignment, in order
pub fn evaluate_batch(problem: &QuantumOptimizationProblem, solutions: &[Vec<u8>]) -> Vec<f64> {
    solutions
        .par_iter()
        .map(|bits| problem.evaluate_solution(bits))
        .collect()
}
