//! Scoring bit assignments against an encoded problem
//!
//! [`QuantumOptimizationProblem::evaluate_solution`] gives the raw QUBO
//! objective. This module adds exhaustive search for small instances and
//! helpers that turn measurement counts into a best solution.

use crate::error::{OptError, Result};
use crate::problem::QuantumOptimizationProblem;
use crate::qaoa::QaoaConfig;
use crate::qubo::QuboMatrix;
use qsynth_state::{SimulatorConfig, StateVectorSimulator};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Largest QUBO searched exhaustively
pub const MAX_EXHAUSTIVE_VARIABLES: usize = 24;

/// A bit assignment with its objective value
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub bits: Vec<u8>,
    pub energy: f64,
}

impl Solution {
    pub fn new(bits: Vec<u8>, energy: f64) -> Self {
        Self { bits, energy }
    }

    /// Bits as a measurement string, highest variable first
    pub fn bitstring(&self) -> String {
        self.bits
            .iter()
            .rev()
            .map(|&b| if b == 0 { '0' } else { '1' })
            .collect()
    }
}

/// Solution read from measurement counts
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSample {
    pub solution: Solution,
    pub count: usize,
}

/// Read a measurement string into bits, variable 0 being the last character
pub fn bits_from_bitstring(bitstring: &str) -> Option<Vec<u8>> {
    bitstring
        .chars()
        .rev()
        .map(|c| match c {
            '0' => Some(0),
            '1' => Some(1),
            _ => None,
        })
        .collect()
}

fn assignment(index: u64, n: usize) -> Vec<u8> {
    (0..n).map(|k| ((index >> k) & 1) as u8).collect()
}

/// Lowest-energy assignment by exhaustive search
///
/// Ties go to the assignment with the smallest integer value (variable 0 as
/// the least significant bit).
///
/// # Errors
/// [`OptError::InvalidArgument`] for more than
/// [`MAX_EXHAUSTIVE_VARIABLES`] variables or none at all.
pub fn brute_force_minimum(qubo: &QuboMatrix) -> Result<Solution> {
    let n = qubo.num_variables();
    if n == 0 || n > MAX_EXHAUSTIVE_VARIABLES {
        return Err(OptError::invalid_argument(format!(
            "exhaustive search supports 1..={MAX_EXHAUSTIVE_VARIABLES} variables, got {n}"
        )));
    }

    let best = (0..1u64 << n)
        .into_par_iter()
        .map(|index| (index, qubo.evaluate(&assignment(index, n))))
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    match best {
        Some((index, energy)) => Ok(Solution::new(assignment(index, n), energy)),
        None => Err(OptError::invalid_argument("empty search space")),
    }
}

/// Score every measured bitstring and keep the lowest energy
///
/// Ties prefer the more frequent outcome, then the smaller string. Strings
/// containing anything other than `0` and `1` are ignored.
pub fn best_from_counts(
    problem: &QuantumOptimizationProblem,
    counts: &BTreeMap<String, usize>,
) -> Option<ScoredSample> {
    counts
        .iter()
        .filter_map(|(bitstring, &count)| {
            let bits = bits_from_bitstring(bitstring)?;
            let energy = problem.evaluate_solution(&bits);
            Some(ScoredSample {
                solution: Solution::new(bits, energy),
                count,
            })
        })
        .min_by(|a, b| match a.solution.energy.total_cmp(&b.solution.energy) {
            Ordering::Equal => b.count.cmp(&a.count),
            other => other,
        })
}

/// Count-weighted mean energy of a measurement histogram
pub fn expected_energy(problem: &QuantumOptimizationProblem, counts: &BTreeMap<String, usize>) -> f64 {
    let (weighted, total) = counts
        .iter()
        .filter_map(|(s, &c)| bits_from_bitstring(s).map(|bits| (bits, c)))
        .fold((0.0, 0usize), |(sum, total), (bits, c)| {
            (sum + problem.evaluate_solution(&bits) * c as f64, total + c)
        });
    if total == 0 {
        0.0
    } else {
        weighted / total as f64
    }
}

/// Generate the QAOA circuit, simulate it and score the samples
///
/// # Errors
/// [`OptError::IllegalState`] for an unencoded problem, or a simulator error
/// when the circuit is too wide.
pub fn sample_qaoa(
    problem: &QuantumOptimizationProblem,
    gamma: &[f64],
    beta: &[f64],
    simulator: SimulatorConfig,
) -> Result<Option<ScoredSample>> {
    let config = QaoaConfig::default().with_measurement(true);
    let circuit = problem.generate_qaoa_circuit_with(gamma, beta, &config)?;
    let result = StateVectorSimulator::new(simulator).run(&circuit)?;
    let best = best_from_counts(problem, &result.counts);
    if let Some(sample) = &best {
        tracing::debug!(
            energy = sample.solution.energy,
            bitstring = %sample.solution.bitstring(),
            count = sample.count,
            shots = result.shots,
            "best QAOA sample"
        );
    }
    Ok(best)
}
