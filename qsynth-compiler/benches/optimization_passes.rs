use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qsynth_compiler::passes::{OptimizationPass, RotationFusion};
use qsynth_compiler::Optimizer;
use qsynth_core::QuantumCircuit;

/// Create a circuit with runs of rotations that fuse and cancel
fn create_rotation_circuit(num_qubits: usize, rotations_per_qubit: usize) -> QuantumCircuit {
    let mut circuit = QuantumCircuit::new(num_qubits);
    for q in 0..num_qubits {
        for i in 0..rotations_per_qubit {
            let angle = (i as f64) * 0.1;
            match i % 3 {
                0 => circuit.rx(q, angle).unwrap(),
                1 => circuit.rz(q, angle).unwrap(),
                _ => circuit.rz(q, -angle).unwrap(),
            };
        }
    }
    circuit
}

/// Create a layered circuit mixing entanglers and self-inverse pairs
fn create_layered_circuit(num_qubits: usize, layers: usize) -> QuantumCircuit {
    let mut circuit = QuantumCircuit::new(num_qubits);
    for _ in 0..layers {
        for q in 0..num_qubits {
            circuit.h(q).unwrap();
        }
        for q in 0..num_qubits - 1 {
            circuit.cnot(q, q + 1).unwrap();
        }
        for q in 0..num_qubits {
            circuit.h(q).unwrap().h(q).unwrap();
        }
    }
    circuit
}

fn bench_rotation_fusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation_fusion");
    for size in [10, 50, 200] {
        let circuit = create_rotation_circuit(8, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &circuit, |b, circuit| {
            b.iter(|| {
                let mut gates = circuit.gates().to_vec();
                RotationFusion::new().apply(black_box(&mut gates)).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let optimizer = Optimizer::standard();
    for layers in [5, 20, 50] {
        let circuit = create_layered_circuit(10, layers);
        group.bench_with_input(BenchmarkId::from_parameter(layers), &circuit, |b, circuit| {
            b.iter(|| optimizer.optimize(black_box(circuit)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rotation_fusion, bench_full_pipeline);
criterion_main!(benches);
