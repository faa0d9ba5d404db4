//! Gate catalog
//!
//! Every gate the workspace knows by name, with its arity, its rotation
//! parameter (if any) and the closed-form unitary it synthesizes to.

use crate::complex::{expi, Complex64, ComplexNumber, I, ONE, ZERO};
use crate::matrix::GateMatrix;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

/// Parameter map attached to a gate
pub type GateParameters = BTreeMap<String, f64>;

/// Reserved parameter carrying a gate's fidelity
pub const FIDELITY_KEY: &str = "fidelity";
/// Reserved parameter overriding a gate's execution time in nanoseconds
pub const GATE_TIME_KEY: &str = "gate_time";

/// Gate kinds known to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GateType {
    Identity,
    H,
    X,
    Y,
    Z,
    S,
    Sdg,
    T,
    Tdg,
    Rx,
    Ry,
    Rz,
    Cnot,
    Cz,
    Swap,
    ISwap,
    Toffoli,
    Fredkin,
    /// User-supplied unitary
    Custom,
    /// Unknown name; synthesizes to identity
    Opaque(String),
}

/// Pauli axis a single-qubit gate is diagonal in (or generated by)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauliAxis {
    X,
    Y,
    Z,
}

impl GateType {
    /// Canonical lowercase name
    pub fn name(&self) -> &str {
        match self {
            GateType::Identity => "identity",
            GateType::H => "h",
            GateType::X => "x",
            GateType::Y => "y",
            GateType::Z => "z",
            GateType::S => "s",
            GateType::Sdg => "sdg",
            GateType::T => "t",
            GateType::Tdg => "tdg",
            GateType::Rx => "rx",
            GateType::Ry => "ry",
            GateType::Rz => "rz",
            GateType::Cnot => "cnot",
            GateType::Cz => "cz",
            GateType::Swap => "swap",
            GateType::ISwap => "iswap",
            GateType::Toffoli => "toffoli",
            GateType::Fredkin => "fredkin",
            GateType::Custom => "custom",
            GateType::Opaque(name) => name,
        }
    }

    /// Fixed qubit count, or `None` for gates of any width
    pub fn arity(&self) -> Option<usize> {
        match self {
            GateType::Identity
            | GateType::H
            | GateType::X
            | GateType::Y
            | GateType::Z
            | GateType::S
            | GateType::Sdg
            | GateType::T
            | GateType::Tdg
            | GateType::Rx
            | GateType::Ry
            | GateType::Rz => Some(1),
            GateType::Cnot | GateType::Cz | GateType::Swap | GateType::ISwap => Some(2),
            GateType::Toffoli | GateType::Fredkin => Some(3),
            GateType::Custom | GateType::Opaque(_) => None,
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self, GateType::Rx | GateType::Ry | GateType::Rz)
    }

    /// Parameter key holding the rotation angle
    pub fn angle_key(&self) -> Option<&'static str> {
        match self {
            GateType::Rx => Some("theta"),
            GateType::Ry => Some("phi"),
            GateType::Rz => Some("lambda"),
            _ => None,
        }
    }

    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            GateType::Identity
                | GateType::H
                | GateType::X
                | GateType::Y
                | GateType::Z
                | GateType::Cnot
                | GateType::Cz
                | GateType::Swap
                | GateType::Toffoli
                | GateType::Fredkin
        )
    }

    pub fn is_controlled(&self) -> bool {
        matches!(
            self,
            GateType::Cnot | GateType::Cz | GateType::Toffoli | GateType::Fredkin
        )
    }

    /// Number of leading qubits acting as controls
    pub fn num_controls(&self) -> usize {
        match self {
            GateType::Cnot | GateType::Cz | GateType::Fredkin => 1,
            GateType::Toffoli => 2,
            _ => 0,
        }
    }

    pub fn pauli_axis(&self) -> Option<PauliAxis> {
        match self {
            GateType::X | GateType::Rx => Some(PauliAxis::X),
            GateType::Y | GateType::Ry => Some(PauliAxis::Y),
            GateType::Z
            | GateType::S
            | GateType::Sdg
            | GateType::T
            | GateType::Tdg
            | GateType::Rz => Some(PauliAxis::Z),
            _ => None,
        }
    }

    /// Inverse type for gates whose adjoint is another catalog entry
    pub fn adjoint(&self) -> Option<GateType> {
        match self {
            GateType::S => Some(GateType::Sdg),
            GateType::Sdg => Some(GateType::S),
            GateType::T => Some(GateType::Tdg),
            GateType::Tdg => Some(GateType::T),
            g if g.is_self_inverse() || g.is_rotation() => Some(g.clone()),
            _ => None,
        }
    }
}

impl FromStr for GateType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Ok(match lower.as_str() {
            "i" | "id" | "identity" => GateType::Identity,
            "h" => GateType::H,
            "x" => GateType::X,
            "y" => GateType::Y,
            "z" => GateType::Z,
            "s" => GateType::S,
            "sdg" => GateType::Sdg,
            "t" => GateType::T,
            "tdg" => GateType::Tdg,
            "rx" => GateType::Rx,
            "ry" => GateType::Ry,
            "rz" => GateType::Rz,
            "cnot" | "cx" => GateType::Cnot,
            "cz" => GateType::Cz,
            "swap" => GateType::Swap,
            "iswap" => GateType::ISwap,
            "toffoli" | "ccx" | "ccnot" => GateType::Toffoli,
            "fredkin" | "cswap" => GateType::Fredkin,
            "custom" => GateType::Custom,
            _ => GateType::Opaque(lower),
        })
    }
}

impl From<&str> for GateType {
    fn from(name: &str) -> Self {
        match name.parse() {
            Ok(g) => g,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed-form unitary for a catalog gate
///
/// Rotation angles default to `0.0` when absent. `Identity`, `Custom` and
/// unknown gates synthesize to the identity on `num_qubits` qubits.
pub fn synthesize(gate_type: &GateType, parameters: &GateParameters, num_qubits: usize) -> GateMatrix {
    let angle = gate_type
        .angle_key()
        .and_then(|key| parameters.get(key))
        .copied()
        .unwrap_or(0.0);
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);

    match gate_type {
        GateType::H => GateMatrix::from_rows([[h, h], [h, -h]]),
        GateType::X => GateMatrix::from_rows([[ZERO, ONE], [ONE, ZERO]]),
        GateType::Y => GateMatrix::from_rows([[ZERO, -I], [I, ZERO]]),
        GateType::Z => GateMatrix::from_rows([[ONE, ZERO], [ZERO, -ONE]]),
        GateType::S => GateMatrix::from_rows([[ONE, ZERO], [ZERO, I]]),
        GateType::Sdg => GateMatrix::from_rows([[ONE, ZERO], [ZERO, -I]]),
        GateType::T => GateMatrix::from_rows([[ONE, ZERO], [ZERO, expi(std::f64::consts::FRAC_PI_4)]]),
        GateType::Tdg => GateMatrix::from_rows([[ONE, ZERO], [ZERO, expi(-std::f64::consts::FRAC_PI_4)]]),
        GateType::Rx => {
            let c = ComplexNumber::new((angle / 2.0).cos(), 0.0);
            let s = ComplexNumber::new(0.0, -(angle / 2.0).sin());
            GateMatrix::from_rows([[c, s], [s, c]])
        }
        GateType::Ry => {
            let c = ComplexNumber::new((angle / 2.0).cos(), 0.0);
            let s = ComplexNumber::new((angle / 2.0).sin(), 0.0);
            GateMatrix::from_rows([[c, -s], [s, c]])
        }
        GateType::Rz => GateMatrix::from_rows([[expi(-angle / 2.0), ZERO], [ZERO, expi(angle / 2.0)]]),
        GateType::Cnot => GateMatrix::permutation(4, 2, 3),
        GateType::Cz => GateMatrix::from_rows([
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ONE, ZERO, ZERO],
            [ZERO, ZERO, ONE, ZERO],
            [ZERO, ZERO, ZERO, -ONE],
        ]),
        GateType::Swap => GateMatrix::permutation(4, 1, 2),
        GateType::ISwap => GateMatrix::from_rows([
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ZERO, I, ZERO],
            [ZERO, I, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
        ]),
        GateType::Toffoli => GateMatrix::permutation(8, 6, 7),
        GateType::Fredkin => GateMatrix::permutation(8, 5, 6),
        GateType::Identity | GateType::Custom | GateType::Opaque(_) => GateMatrix::identity(1 << num_qubits),
    }
}

/// Reassemble a matrix from flattened real and imaginary parts
///
/// Returns `None` when the parts differ in length, are not a perfect square,
/// or do not match `2^num_qubits` on a side.
pub fn custom_matrix(real: &[f64], imag: &[f64], num_qubits: usize) -> Option<GateMatrix> {
    if real.len() != imag.len() {
        return None;
    }
    let dim = (real.len() as f64).sqrt().round() as usize;
    if dim * dim != real.len() || dim != 1 << num_qubits {
        return None;
    }
    let data = real
        .iter()
        .zip(imag)
        .map(|(&re, &im)| Complex64::new(re, im))
        .collect();
    GateMatrix::from_row_major(dim, data)
}
