//! Qubit addressing

use smallvec::SmallVec;
use std::fmt;

/// Index of a qubit inside a circuit register
///
/// Qubit `q` corresponds to bit `q` of a computational basis index,
/// so `q0` is the least significant bit.
///
/// # Example
/// ```
/// use qsynth_core::QubitId;
///
/// let q = QubitId::new(2);
/// assert_eq!(q.index(), 2);
/// assert_eq!(q.mask(), 0b100);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct QubitId(usize);

impl QubitId {
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Bit mask selecting this qubit in a basis-state index
    #[inline]
    pub const fn mask(&self) -> usize {
        1 << self.0
    }
}

/// Inline storage for the qubits of one gate (catalog gates touch at most three)
pub type QubitList = SmallVec<[QubitId; 3]>;

/// Convert raw indices into a [`QubitList`]
pub fn qubit_list(indices: &[usize]) -> QubitList {
    indices.iter().copied().map(QubitId::new).collect()
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_matches_bit_position() {
        assert_eq!(QubitId::new(0).mask(), 1);
        assert_eq!(QubitId::new(3).mask(), 8);
    }

    #[test]
    fn test_qubit_list_preserves_order() {
        let list = qubit_list(&[2, 0, 1]);
        let raw: Vec<usize> = list.iter().map(|q| q.index()).collect();
        assert_eq!(raw, vec![2, 0, 1]);
    }

    #[test]
    fn test_display() {
        assert_eq!(QubitId::new(7).to_string(), "q7");
    }
}
