//! Sparse QUBO and Ising models
//!
//! A [`QuboMatrix`] stores the upper triangle of `Q` keyed by `(i, j)` with
//! `i <= j`; diagonal entries are the linear terms. The objective of an
//! assignment `x ∈ {0,1}ⁿ` is `Σ Q_ij · x_i · x_j`.

use std::collections::BTreeMap;
use std::fmt;

/// Order a variable pair so that `i <= j`
pub fn canonical(i: usize, j: usize) -> (usize, usize) {
    if i <= j {
        (i, j)
    } else {
        (j, i)
    }
}

/// Upper-triangular sparse QUBO
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuboMatrix {
    terms: BTreeMap<(usize, usize), f64>,
    /// Declared width; the effective width also covers every stored index
    num_variables: usize,
}

impl QuboMatrix {
    pub fn new(num_variables: usize) -> Self {
        Self {
            terms: BTreeMap::new(),
            num_variables,
        }
    }

    /// Build from arbitrary `(i, j, coefficient)` triples, folding `(j, i)`
    /// onto `(i, j)`
    pub fn from_terms(num_variables: usize, terms: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
        let mut qubo = Self::new(num_variables);
        for (i, j, coeff) in terms {
            qubo.add(i, j, coeff);
        }
        qubo
    }

    /// Accumulate `coeff` onto the canonical entry of `(i, j)`
    pub fn add(&mut self, i: usize, j: usize, coeff: f64) {
        *self.terms.entry(canonical(i, j)).or_insert(0.0) += coeff;
    }

    pub fn add_linear(&mut self, i: usize, coeff: f64) {
        self.add(i, i, coeff);
    }

    pub fn add_quadratic(&mut self, i: usize, j: usize, coeff: f64) {
        self.add(i, j, coeff);
    }

    /// Coefficient of `(i, j)` in either order, 0.0 when absent
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.terms.get(&canonical(i, j)).copied().unwrap_or(0.0)
    }

    /// Entries in `(i, j)` order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.terms.iter().map(|(&k, &v)| (k, v))
    }

    pub fn terms(&self) -> &BTreeMap<(usize, usize), f64> {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn num_variables(&self) -> usize {
        let highest = self.terms.keys().map(|&(_, j)| j.saturating_add(1)).max().unwrap_or(0);
        self.num_variables.max(highest)
    }

    /// Width passed at construction, ignoring the terms
    pub fn declared_variables(&self) -> usize {
        self.num_variables
    }

    /// `Σ Q_ij · bits[i] · bits[j]`
    ///
    /// Entries referring past the end of `bits` are skipped.
    pub fn evaluate(&self, bits: &[u8]) -> f64 {
        self.terms
            .iter()
            .filter_map(|(&(i, j), &coeff)| {
                let (bi, bj) = (bits.get(i)?, bits.get(j)?);
                Some(if i == j {
                    coeff * f64::from(*bi)
                } else {
                    coeff * f64::from(*bi) * f64::from(*bj)
                })
            })
            .sum()
    }

    /// Energy change from flipping variable `k` of `bits`
    pub(crate) fn flip_delta(&self, bits: &[u8], k: usize) -> f64 {
        let direction = if bits[k] == 0 { 1.0 } else { -1.0 };
        let field: f64 = self
            .terms
            .iter()
            .filter(|(&(i, j), _)| i == k || j == k)
            .map(|(&(i, j), &coeff)| {
                if i == j {
                    coeff
                } else {
                    let other = if i == k { j } else { i };
                    coeff * f64::from(bits.get(other).copied().unwrap_or(0))
                }
            })
            .sum();
        direction * field
    }

    /// Equivalent spin model under `x = (1 - s) / 2`
    pub fn to_ising(&self) -> IsingModel {
        let mut ising = IsingModel::new(self.num_variables());
        for (&(i, j), &coeff) in &self.terms {
            if i == j {
                ising.fields[i] -= coeff / 2.0;
                ising.offset += coeff / 2.0;
            } else {
                *ising.couplings.entry((i, j)).or_insert(0.0) += coeff / 4.0;
                ising.fields[i] -= coeff / 4.0;
                ising.fields[j] -= coeff / 4.0;
                ising.offset += coeff / 4.0;
            }
        }
        ising
    }
}

impl fmt::Display for QuboMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QUBO({} variables, {} terms)", self.num_variables(), self.len())
    }
}

/// Spin model `E(s) = Σ J_ij s_i s_j + Σ h_i s_i + offset` over `s ∈ {-1,+1}ⁿ`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsingModel {
    pub couplings: BTreeMap<(usize, usize), f64>,
    pub fields: Vec<f64>,
    pub offset: f64,
}

impl IsingModel {
    /// Model with zero fields on `num_spins` spins
    pub fn new(num_spins: usize) -> Self {
        Self {
            couplings: BTreeMap::new(),
            fields: vec![0.0; num_spins],
            offset: 0.0,
        }
    }

    pub fn num_spins(&self) -> usize {
        self.fields.len()
    }

    pub fn energy(&self, spins: &[i8]) -> f64 {
        let spin = |k: usize| spins.get(k).map(|&s| f64::from(s)).unwrap_or(0.0);
        let coupling: f64 = self
            .couplings
            .iter()
            .map(|(&(i, j), &c)| c * spin(i) * spin(j))
            .sum();
        let field: f64 = self.fields.iter().enumerate().map(|(i, &h)| h * spin(i)).sum();
        coupling + field + self.offset
    }
}

/// Map bits to spins with `0 → +1`, `1 → -1`
pub fn bits_to_spins(bits: &[u8]) -> Vec<i8> {
    bits.iter().map(|&b| if b == 0 { 1 } else { -1 }).collect()
}
