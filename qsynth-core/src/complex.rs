//! Complex arithmetic
//!
//! Amplitudes and matrix entries are plain [`Complex64`] values; this module
//! adds the small vocabulary the rest of the workspace uses on top of it.

pub use num_complex::Complex64;

/// Immutable complex value used for amplitudes and matrix entries
pub type ComplexNumber = Complex64;

pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);
pub const I: Complex64 = Complex64::new(0.0, 1.0);

/// Quantum-flavoured accessors for complex numbers
pub trait ComplexExt {
    /// `√(re² + im²)`
    fn magnitude(&self) -> f64;

    /// `atan2(im, re)`
    fn phase(&self) -> f64;

    /// `|z|²`, the Born-rule weight of an amplitude
    fn probability(&self) -> f64;

    /// Component-wise comparison within `tolerance`
    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool;
}

impl ComplexExt for Complex64 {
    #[inline]
    fn magnitude(&self) -> f64 {
        self.norm()
    }

    #[inline]
    fn phase(&self) -> f64 {
        self.im.atan2(self.re)
    }

    #[inline]
    fn probability(&self) -> f64 {
        self.norm_sqr()
    }

    #[inline]
    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.re - other.re).abs() < tolerance && (self.im - other.im).abs() < tolerance
    }
}

/// `e^{iθ}`
#[inline]
pub fn expi(theta: f64) -> Complex64 {
    Complex64::new(theta.cos(), theta.sin())
}
