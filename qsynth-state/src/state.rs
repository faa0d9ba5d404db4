//! Pure quantum state and its information-theoretic measures

use crate::error::{Result, StateError};
use nalgebra::DMatrix;
use num_complex::Complex64;
use qsynth_core::complex::{ComplexExt, ONE, ZERO};
use std::collections::BTreeMap;

/// Probabilities below this are treated as zero
pub const PROBABILITY_EPSILON: f64 = 1e-10;

/// State vector over `n` qubits
///
/// Basis index bit `q` holds the value of qubit `q`. Normalization is not
/// enforced; entropy and coherence are computed once at construction.
///
/// # Example
/// ```
/// use qsynth_state::QuantumState;
/// use num_complex::Complex64;
///
/// let h = std::f64::consts::FRAC_1_SQRT_2;
/// let bell = QuantumState::new(vec![
///     Complex64::new(h, 0.0),
///     Complex64::new(0.0, 0.0),
///     Complex64::new(0.0, 0.0),
///     Complex64::new(h, 0.0),
/// ]).unwrap();
/// assert_eq!(bell.num_qubits(), 2);
/// assert!((bell.von_neumann_entropy() - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
    entropy: f64,
    coherence: f64,
}

/// Schmidt decomposition across a bipartition
#[derive(Debug, Clone, PartialEq)]
pub struct SchmidtDecomposition {
    pub valid: bool,
    /// Non-zero coefficients, descending, normalized so their squares sum to 1
    pub coefficients: Vec<f64>,
    pub rank: usize,
    pub entanglement_entropy: f64,
}

impl SchmidtDecomposition {
    fn invalid() -> Self {
        Self {
            valid: false,
            coefficients: Vec::new(),
            rank: 0,
            entanglement_entropy: 0.0,
        }
    }
}

impl QuantumState {
    /// Wrap an amplitude vector
    ///
    /// # Errors
    /// `InvalidDimension` unless the length is a power of two
    pub fn new(amplitudes: Vec<Complex64>) -> Result<Self> {
        let dimension = amplitudes.len();
        if !dimension.is_power_of_two() {
            return Err(StateError::InvalidDimension { dimension });
        }
        let num_qubits = dimension.trailing_zeros() as usize;
        let entropy = shannon_entropy(amplitudes.iter().map(|a| a.probability()));
        let coherence = l1_coherence(&amplitudes);
        Ok(Self {
            amplitudes,
            num_qubits,
            entropy,
            coherence,
        })
    }

    /// `|0…0⟩` on `num_qubits` qubits
    pub fn zero(num_qubits: usize) -> Self {
        Self::basis(num_qubits, 0)
    }

    /// Computational basis state `|index⟩`, wrapped modulo the dimension
    pub fn basis(num_qubits: usize, index: usize) -> Self {
        let dimension = 1usize << num_qubits;
        let mut amplitudes = vec![ZERO; dimension];
        amplitudes[index % dimension] = ONE;
        Self {
            amplitudes,
            num_qubits,
            entropy: 0.0,
            coherence: 0.0,
        }
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// `|amplitude[index]|²`, zero when out of range
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes
            .get(index)
            .map(|a| a.probability())
            .unwrap_or(0.0)
    }

    /// Basis index to probability, dropping entries below 1e-10
    pub fn measurement_probabilities(&self) -> BTreeMap<usize, f64> {
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(i, a)| (i, a.probability()))
            .filter(|&(_, p)| p >= PROBABILITY_EPSILON)
            .collect()
    }

    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.probability())
            .sum::<f64>()
            .sqrt()
    }

    /// Copy scaled to unit norm; a zero vector is returned unchanged
    pub fn normalized(&self) -> Self {
        let norm = self.norm();
        if norm < PROBABILITY_EPSILON {
            return self.clone();
        }
        let amplitudes = self.amplitudes.iter().map(|&a| a / norm).collect();
        Self {
            amplitudes,
            num_qubits: self.num_qubits,
            entropy: 0.0,
            coherence: 0.0,
        }
        .recompute()
    }

    fn recompute(mut self) -> Self {
        self.entropy = shannon_entropy(self.amplitudes.iter().map(|a| a.probability()));
        self.coherence = l1_coherence(&self.amplitudes);
        self
    }

    /// Kronecker product; `other` occupies the low-order qubits
    pub fn tensor_product(&self, other: &QuantumState) -> QuantumState {
        let mut amplitudes = Vec::with_capacity(self.dimension() * other.dimension());
        for a in &self.amplitudes {
            for b in &other.amplitudes {
                amplitudes.push(*a * *b);
            }
        }
        Self {
            amplitudes,
            num_qubits: self.num_qubits + other.num_qubits,
            entropy: 0.0,
            coherence: 0.0,
        }
        .recompute()
    }

    /// Reduce onto the qubits not listed in `traced_qubits`
    ///
    /// Probability mass of basis states that agree on the kept qubits is summed;
    /// the returned amplitudes are the square roots of those sums, so relative
    /// phases are discarded.
    pub fn partial_trace(&self, traced_qubits: &[usize]) -> Result<QuantumState> {
        if let Some(&index) = traced_qubits.iter().find(|&&q| q >= self.num_qubits) {
            return Err(StateError::InvalidQubitIndex {
                index,
                num_qubits: self.num_qubits,
            });
        }
        let kept: Vec<usize> = (0..self.num_qubits)
            .filter(|q| !traced_qubits.contains(q))
            .collect();

        let mut probabilities = vec![0.0; 1 << kept.len()];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let reduced = kept
                .iter()
                .enumerate()
                .fold(0usize, |acc, (k, &q)| acc | (((i >> q) & 1) << k));
            probabilities[reduced] += amp.probability();
        }

        Self::new(
            probabilities
                .into_iter()
                .map(|p| Complex64::new(p.sqrt(), 0.0))
                .collect(),
        )
    }

    fn check_width(&self, other: &QuantumState) -> Result<()> {
        if self.num_qubits != other.num_qubits {
            return Err(StateError::DimensionMismatch {
                expected: self.num_qubits,
                actual: other.num_qubits,
            });
        }
        Ok(())
    }

    /// `|⟨ψ|φ⟩|²`
    pub fn fidelity(&self, other: &QuantumState) -> Result<f64> {
        self.check_width(other)?;
        let overlap: Complex64 = self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * *b)
            .sum();
        Ok(overlap.norm_sqr())
    }

    /// Half the L1 distance between the two measurement distributions
    pub fn trace_distance(&self, other: &QuantumState) -> Result<f64> {
        self.check_width(other)?;
        let total: f64 = self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| (a.probability() - b.probability()).abs())
            .sum();
        Ok(0.5 * total)
    }

    /// Shannon entropy in bits of the measurement distribution
    #[inline]
    pub fn von_neumann_entropy(&self) -> f64 {
        self.entropy
    }

    /// l1-norm of coherence: sum of off-diagonal magnitudes of `|ψ⟩⟨ψ|`
    #[inline]
    pub fn coherence(&self) -> f64 {
        self.coherence
    }

    /// Wootters concurrence for two-qubit states; `0.0` for other widths
    pub fn concurrence(&self) -> f64 {
        if self.num_qubits != 2 {
            return 0.0;
        }
        let a = &self.amplitudes;
        2.0 * (a[0] * a[3] - a[1] * a[2]).norm()
    }

    /// `Σ pᵢ²`
    pub fn purity(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.probability().powi(2)).sum()
    }

    /// Schmidt decomposition with qubits `0..=partition_qubit` on one side
    ///
    /// Invalid for fewer than two qubits or when the partition leaves the
    /// second subsystem empty.
    pub fn schmidt_decomposition(&self, partition_qubit: usize) -> SchmidtDecomposition {
        if self.num_qubits < 2 || partition_qubit + 1 >= self.num_qubits {
            return SchmidtDecomposition::invalid();
        }
        let dim_a = 1usize << (partition_qubit + 1);
        let dim_b = self.dimension() / dim_a;
        let matrix = DMatrix::from_fn(dim_a, dim_b, |a, b| self.amplitudes[a + dim_a * b]);

        let mut coefficients: Vec<f64> = matrix
            .singular_values()
            .iter()
            .copied()
            .filter(|&s| s > PROBABILITY_EPSILON)
            .collect();
        coefficients.sort_by(|a, b| b.total_cmp(a));

        let norm = coefficients.iter().map(|c| c * c).sum::<f64>().sqrt();
        if norm > 0.0 {
            for c in &mut coefficients {
                *c /= norm;
            }
        }
        let entanglement_entropy = shannon_entropy(coefficients.iter().map(|c| c * c));

        SchmidtDecomposition {
            valid: true,
            rank: coefficients.len(),
            coefficients,
            entanglement_entropy,
        }
    }
}

fn shannon_entropy(probabilities: impl Iterator<Item = f64>) -> f64 {
    probabilities
        .filter(|&p| p > PROBABILITY_EPSILON)
        .map(|p| -p * p.log2())
        .sum()
}

fn l1_coherence(amplitudes: &[Complex64]) -> f64 {
    let (sum, sum_sq) = amplitudes.iter().fold((0.0, 0.0), |(s, sq), a| {
        let m = a.magnitude();
        (s + m, sq + m * m)
    });
    (sum * sum - sum_sq).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn real(values: &[f64]) -> QuantumState {
        QuantumState::new(values.iter().map(|&v| Complex64::new(v, 0.0)).collect()).unwrap()
    }

    fn bell() -> QuantumState {
        real(&[FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2])
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let err = QuantumState::new(vec![ONE; 3]).unwrap_err();
        assert_eq!(err, StateError::InvalidDimension { dimension: 3 });
        assert!(QuantumState::new(Vec::new()).is_err());
    }

    #[test]
    fn test_probability_out_of_range() {
        let s = QuantumState::zero(2);
        assert_relative_eq!(s.probability(0), 1.0);
        assert_eq!(s.probability(99), 0.0);
    }

    #[test]
    fn test_measurement_probabilities_omit_zero() {
        let probs = bell().measurement_probabilities();
        assert_eq!(probs.len(), 2);
        assert_relative_eq!(probs[&0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(probs[&3], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_bell_measures() {
        let s = bell();
        assert_relative_eq!(s.von_neumann_entropy(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(s.concurrence(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(s.purity(), 0.5, epsilon = 1e-10);
        assert_relative_eq!(s.coherence(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_concurrence_zero_for_other_widths() {
        assert_eq!(QuantumState::zero(3).concurrence(), 0.0);
        assert_eq!(QuantumState::zero(1).concurrence(), 0.0);
    }

    #[test]
    fn test_tensor_product_widths() {
        let a = QuantumState::basis(1, 1);
        let b = QuantumState::zero(2);
        let t = a.tensor_product(&b);
        assert_eq!(t.num_qubits(), 3);
        assert_relative_eq!(t.probability(4), 1.0);
    }

    #[test]
    fn test_partial_trace_of_product_state() {
        // |1⟩ on qubit 0, |0⟩ on qubit 1
        let s = QuantumState::basis(2, 0b01);
        let reduced = s.partial_trace(&[1]).unwrap();
        assert_eq!(reduced.num_qubits(), 1);
        assert_relative_eq!(reduced.probability(1), 1.0);

        let other = s.partial_trace(&[0]).unwrap();
        assert_relative_eq!(other.probability(0), 1.0);
    }

    #[test]
    fn test_partial_trace_rejects_bad_qubit() {
        let err = bell().partial_trace(&[2]).unwrap_err();
        assert!(matches!(err, StateError::InvalidQubitIndex { index: 2, .. }));
    }

    #[test]
    fn test_fidelity_and_trace_distance() {
        let zero = QuantumState::zero(1);
        let one = QuantumState::basis(1, 1);
        assert_relative_eq!(zero.fidelity(&zero).unwrap(), 1.0);
        assert_relative_eq!(zero.fidelity(&one).unwrap(), 0.0);
        assert_relative_eq!(zero.trace_distance(&one).unwrap(), 1.0);
        assert!(matches!(
            zero.fidelity(&bell()),
            Err(StateError::DimensionMismatch { expected: 1, actual: 2 })
        ));
        assert!(zero.trace_distance(&bell()).is_err());
    }

    #[test]
    fn test_schmidt_bell() {
        let d = bell().schmidt_decomposition(0);
        assert!(d.valid);
        assert_eq!(d.rank, 2);
        assert_relative_eq!(d.coefficients[0], FRAC_1_SQRT_2, epsilon = 1e-10);
        assert_relative_eq!(d.entanglement_entropy, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_schmidt_product_state() {
        let d = QuantumState::basis(3, 5).schmidt_decomposition(1);
        assert!(d.valid);
        assert_eq!(d.rank, 1);
        assert_relative_eq!(d.entanglement_entropy, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_schmidt_invalid_partitions() {
        assert!(!QuantumState::zero(1).schmidt_decomposition(0).valid);
        assert!(!bell().schmidt_decomposition(1).valid);
    }

    #[test]
    fn test_normalized() {
        let s = real(&[3.0, 4.0]);
        assert_relative_eq!(s.norm(), 5.0);
        let n = s.normalized();
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.probability(1), 0.64, epsilon = 1e-12);
    }
}
