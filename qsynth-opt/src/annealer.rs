//! Classical simulated annealing over a QUBO
//!
//! A single-bit-flip Metropolis sampler run on the CPU. It is a classical
//! heuristic for cross-checking encodings and QAOA samples, and reports no
//! device or hardware figures.

use crate::error::{OptError, Result};
use crate::evaluator::Solution;
use crate::qubo::QuboMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Annealing schedule
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealerConfig {
    /// Independent restarts, run in parallel
    pub num_reads: usize,

    /// Proposed flips per read
    pub steps: usize,

    pub initial_temperature: f64,

    /// Geometric factor applied after every `num_variables` proposals
    pub cooling_rate: f64,

    /// Base seed; read `k` uses `seed + k`
    pub seed: Option<u64>,
}

impl Default for AnnealerConfig {
    fn default() -> Self {
        Self {
            num_reads: 10,
            steps: 1000,
            initial_temperature: 1.0,
            cooling_rate: 0.95,
            seed: None,
        }
    }
}

impl AnnealerConfig {
    pub fn with_num_reads(mut self, num_reads: usize) -> Self {
        self.num_reads = num_reads;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    pub fn with_cooling_rate(mut self, cooling_rate: f64) -> Self {
        self.cooling_rate = cooling_rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.num_reads == 0 {
            return Err(OptError::invalid_argument("num_reads must be positive"));
        }
        if !(self.initial_temperature > 0.0) {
            return Err(OptError::invalid_argument("initial temperature must be positive"));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(OptError::invalid_argument("cooling rate must be in (0, 1]"));
        }
        Ok(())
    }
}

/// Best solution of every read, lowest energy first
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealResult {
    pub samples: Vec<Solution>,
}

impl AnnealResult {
    pub fn best(&self) -> Option<&Solution> {
        self.samples.first()
    }
}

/// Simulated-annealing sampler
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnnealer {
    config: AnnealerConfig,
}

impl SimulatedAnnealer {
    pub fn new(config: AnnealerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnnealerConfig {
        &self.config
    }

    /// Anneal `qubo` from `num_reads` random starting points
    ///
    /// # Errors
    /// [`OptError::InvalidArgument`] for an empty QUBO or an invalid schedule.
    pub fn sample(&self, qubo: &QuboMatrix) -> Result<AnnealResult> {
        self.config.validate()?;
        let n = qubo.num_variables();
        if n == 0 {
            return Err(OptError::invalid_argument("QUBO has no variables"));
        }

        let base_seed = self
            .config
            .seed
            .unwrap_or_else(|| StdRng::from_entropy().gen());
        let mut samples: Vec<Solution> = (0..self.config.num_reads)
            .into_par_iter()
            .map(|read| self.anneal(qubo, n, base_seed.wrapping_add(read as u64)))
            .collect();
        samples.sort_by(|a, b| a.energy.total_cmp(&b.energy));

        tracing::debug!(
            variables = n,
            reads = self.config.num_reads,
            best = samples.first().map(|s| s.energy),
            "annealing finished"
        );
        Ok(AnnealResult { samples })
    }

    fn anneal(&self, qubo: &QuboMatrix, n: usize, seed: u64) -> Solution {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut bits: Vec<u8> = (0..n).map(|_| rng.gen_range(0..=1)).collect();
        let mut energy = qubo.evaluate(&bits);
        let mut best = Solution::new(bits.clone(), energy);
        let mut temperature = self.config.initial_temperature;

        for step in 0..self.config.steps {
            let k = rng.gen_range(0..n);
            let delta = qubo.flip_delta(&bits, k);
            if delta <= 0.0 || rng.gen::<f64>() < (-delta / temperature).exp() {
                bits[k] ^= 1;
                energy += delta;
                if energy < best.energy {
                    best = Solution::new(bits.clone(), energy);
                }
            }
            if (step + 1) % n == 0 {
                temperature *= self.config.cooling_rate;
            }
        }

        // recompute to shed accumulated rounding
        best.energy = qubo.evaluate(&best.bits);
        best
    }
}
