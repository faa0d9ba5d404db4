//! Entanglement measures on simulated circuits

use approx::assert_relative_eq;
use qsynth_core::QuantumCircuit;
use qsynth_state::{SimulatorConfig, StateVectorSimulator};

fn simulate(circuit: &QuantumCircuit) -> qsynth_state::QuantumState {
    StateVectorSimulator::new(SimulatorConfig::default().with_seed(1))
        .statevector(circuit)
        .unwrap()
}

#[test]
fn bell_state_from_circuit() {
    let mut c = QuantumCircuit::new(2);
    c.h(0).unwrap().cnot(0, 1).unwrap();
    let state = simulate(&c);

    assert_relative_eq!(state.von_neumann_entropy(), 1.0, epsilon = 1e-10);
    assert_relative_eq!(state.concurrence(), 1.0, epsilon = 1e-10);
    let schmidt = state.schmidt_decomposition(0);
    assert_eq!(schmidt.rank, 2);
    assert_relative_eq!(schmidt.entanglement_entropy, 1.0, epsilon = 1e-10);
}

#[test]
fn ghz_reduced_state_is_mixed_distribution() {
    let mut c = QuantumCircuit::new(3);
    c.h(0).unwrap().cnot(0, 1).unwrap().cnot(1, 2).unwrap();
    let state = simulate(&c);

    let reduced = state.partial_trace(&[2]).unwrap();
    assert_eq!(reduced.num_qubits(), 2);
    assert_relative_eq!(reduced.probability(0b00), 0.5, epsilon = 1e-10);
    assert_relative_eq!(reduced.probability(0b11), 0.5, epsilon = 1e-10);

    let split = state.schmidt_decomposition(0);
    assert!(split.valid);
    assert_eq!(split.rank, 2);
}

#[test]
fn product_circuit_has_no_entanglement() {
    let mut c = QuantumCircuit::new(2);
    c.h(0).unwrap().h(1).unwrap();
    let state = simulate(&c);
    assert_relative_eq!(state.concurrence(), 0.0, epsilon = 1e-10);
    assert_eq!(state.schmidt_decomposition(0).rank, 1);
    assert_relative_eq!(state.von_neumann_entropy(), 2.0, epsilon = 1e-10);
}

#[test]
fn inverse_circuit_returns_to_zero() {
    let mut forward = QuantumCircuit::new(2);
    forward.h(0).unwrap().rx(1, 0.3).unwrap().cnot(0, 1).unwrap().t(1).unwrap();

    let mut round_trip = forward.clone();
    for gate in forward.gates().iter().rev() {
        round_trip.add_gate(gate.inverse()).unwrap();
    }
    let state = simulate(&round_trip);
    assert_relative_eq!(state.probability(0), 1.0, epsilon = 1e-10);
}
