//! Grover search circuits
//!
//! Marked states are basis indices over the search register, bit `q` of the
//! index being qubit `q`. Multi-controlled `Z` is built from a Toffoli ladder
//! on [`work_qubits`] extra qubits placed after the search register; they
//! start and end in `|0⟩`. Only the search register is measured.

use crate::error::{OptError, Result};
use qsynth_core::QuantumCircuit;
use std::f64::consts::FRAC_PI_4;

/// Ancillas needed by the multi-controlled `Z` on `num_qubits` qubits
pub fn work_qubits(num_qubits: usize) -> usize {
    num_qubits.saturating_sub(2)
}

/// `⌊π/4 · √(N/M)⌋`, at least 1
pub fn optimal_iterations(num_qubits: usize, num_marked: usize) -> usize {
    if num_marked == 0 {
        return 1;
    }
    let ratio = (num_qubits as f64).exp2() / num_marked as f64;
    ((FRAC_PI_4 * ratio.sqrt()).floor() as usize).max(1)
}

/// Flip the phase of the all-ones state of `qubits`
///
/// Needs `work_qubits(qubits.len())` ancillas in `work`, all in `|0⟩`.
pub fn multi_controlled_z(circuit: &mut QuantumCircuit, qubits: &[usize], work: &[usize]) -> Result<()> {
    match qubits {
        [] => Err(OptError::invalid_argument("multi-controlled Z needs a qubit")),
        [q] => {
            circuit.z(*q)?;
            Ok(())
        }
        [a, b] => {
            circuit.cz(*a, *b)?;
            Ok(())
        }
        [first, second, rest @ .., last] => {
            let needed = work_qubits(qubits.len());
            if work.len() < needed {
                return Err(OptError::invalid_argument(format!(
                    "multi-controlled Z on {} qubits needs {needed} work qubits, got {}",
                    qubits.len(),
                    work.len()
                )));
            }
            // AND of every control but the last accumulates down the work qubits
            let mut ladder = vec![(*first, *second, work[0])];
            for (k, &q) in rest.iter().enumerate() {
                ladder.push((work[k], q, work[k + 1]));
            }
            for &(c1, c2, t) in &ladder {
                circuit.toffoli(c1, c2, t)?;
            }
            circuit.cz(work[needed - 1], *last)?;
            for &(c1, c2, t) in ladder.iter().rev() {
                circuit.toffoli(c1, c2, t)?;
            }
            Ok(())
        }
    }
}

/// Grover search over `num_qubits` qubits for the `marked` basis states
///
/// # Errors
/// [`OptError::InvalidArgument`] for an empty register, no marked states or
/// a marked index outside the register.
///
/// # Example
/// ```
/// use qsynth_opt::grover::grover_circuit;
///
/// let circuit = grover_circuit(3, &[5], 2).unwrap();
/// assert_eq!(circuit.num_qubits(), 4);
/// assert_eq!(circuit.measurements().len(), 3);
/// ```
pub fn grover_circuit(num_qubits: usize, marked: &[usize], iterations: usize) -> Result<QuantumCircuit> {
    if num_qubits == 0 {
        return Err(OptError::invalid_argument("Grover search needs at least one qubit"));
    }
    if marked.is_empty() {
        return Err(OptError::invalid_argument("no marked states"));
    }
    if num_qubits >= usize::BITS as usize {
        return Err(OptError::invalid_argument(format!("{num_qubits} qubits is too wide")));
    }
    let dimension = 1usize << num_qubits;
    if let Some(&bad) = marked.iter().find(|&&m| m >= dimension) {
        return Err(OptError::invalid_argument(format!(
            "marked state {bad} outside {num_qubits}-qubit register"
        )));
    }

    let register: Vec<usize> = (0..num_qubits).collect();
    let work: Vec<usize> = (num_qubits..num_qubits + work_qubits(num_qubits)).collect();
    let mut circuit = QuantumCircuit::with_classical_bits(num_qubits + work.len(), num_qubits);

    for &q in &register {
        circuit.h(q)?;
    }
    for _ in 0..iterations {
        for &state in marked {
            apply_oracle(&mut circuit, &register, &work, state)?;
        }
        apply_diffusion(&mut circuit, &register, &work)?;
    }
    for &q in &register {
        circuit.measure(q, q)?;
    }

    tracing::debug!(
        qubits = num_qubits,
        marked = marked.len(),
        iterations,
        gates = circuit.len(),
        "generated Grover circuit"
    );
    Ok(circuit)
}

/// Phase-flip `|state⟩`
fn apply_oracle(circuit: &mut QuantumCircuit, register: &[usize], work: &[usize], state: usize) -> Result<()> {
    let zeros: Vec<usize> = register
        .iter()
        .copied()
        .filter(|&q| (state >> q) & 1 == 0)
        .collect();
    for &q in &zeros {
        circuit.x(q)?;
    }
    multi_controlled_z(circuit, register, work)?;
    for &q in &zeros {
        circuit.x(q)?;
    }
    Ok(())
}

/// Reflection about the uniform superposition
fn apply_diffusion(circuit: &mut QuantumCircuit, register: &[usize], work: &[usize]) -> Result<()> {
    for &q in register {
        circuit.h(q)?.x(q)?;
    }
    multi_controlled_z(circuit, register, work)?;
    for &q in register {
        circuit.x(q)?.h(q)?;
    }
    Ok(())
}
