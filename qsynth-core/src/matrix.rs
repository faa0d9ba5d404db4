//! Dense square matrices for gate unitaries

use crate::complex::{Complex64, ComplexExt, ONE, ZERO};
use std::fmt;

/// Square complex matrix stored row-major
///
/// A gate on `k` qubits carries a `2^k × 2^k` matrix. The first qubit listed
/// on the gate is the most significant bit of the row/column index.
#[derive(Clone, Debug, PartialEq)]
pub struct GateMatrix {
    dim: usize,
    data: Vec<Complex64>,
}

impl GateMatrix {
    /// Identity of size `dim × dim`
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![ZERO; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = ONE;
        }
        Self { dim, data }
    }

    /// Build from row-major entries; `None` unless `data.len() == dim²`
    pub fn from_row_major(dim: usize, data: Vec<Complex64>) -> Option<Self> {
        (data.len() == dim * dim).then_some(Self { dim, data })
    }

    /// Build from fixed-size rows
    pub fn from_rows<const N: usize>(rows: [[Complex64; N]; N]) -> Self {
        Self {
            dim: N,
            data: rows.iter().flat_map(|row| row.iter().copied()).collect(),
        }
    }

    /// Identity with two basis rows exchanged
    pub(crate) fn permutation(dim: usize, a: usize, b: usize) -> Self {
        let mut m = Self::identity(dim);
        m.set(a, a, ZERO);
        m.set(b, b, ZERO);
        m.set(a, b, ONE);
        m.set(b, a, ONE);
        m
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of qubits this matrix acts on
    pub fn num_qubits(&self) -> usize {
        self.dim.trailing_zeros() as usize
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row * self.dim + col] = value;
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// Matrix product `self · other`
    ///
    /// # Panics
    /// Panics if the dimensions differ
    pub fn multiply(&self, other: &GateMatrix) -> GateMatrix {
        assert_eq!(self.dim, other.dim, "matrix dimension mismatch");
        let n = self.dim;
        let mut data = vec![ZERO; n * n];
        for i in 0..n {
            for k in 0..n {
                let a = self.get(i, k);
                if a == ZERO {
                    continue;
                }
                for j in 0..n {
                    data[i * n + j] += a * other.get(k, j);
                }
            }
        }
        GateMatrix { dim: n, data }
    }

    /// Conjugate transpose
    pub fn dagger(&self) -> GateMatrix {
        let n = self.dim;
        let mut data = vec![ZERO; n * n];
        for i in 0..n {
            for j in 0..n {
                data[j * n + i] = self.get(i, j).conj();
            }
        }
        GateMatrix { dim: n, data }
    }

    /// `M·M† ≈ I` within `tolerance`, entry by entry
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let product = self.multiply(&self.dagger());
        (0..self.dim).all(|i| {
            (0..self.dim).all(|j| {
                let expected = if i == j { ONE } else { ZERO };
                product.get(i, j).approx_eq(&expected, tolerance)
            })
        })
    }

    pub fn approx_eq(&self, other: &GateMatrix, tolerance: f64) -> bool {
        self.dim == other.dim
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.approx_eq(b, tolerance))
    }
}

impl fmt::Display for GateMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dim {
            write!(f, "[")?;
            for col in 0..self.dim {
                let z = self.get(row, col);
                if col > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}{:+.4}i", z.re, z.im)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
