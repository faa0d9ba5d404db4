//! QAOA on a four-vertex MaxCut instance
//!
//! Encodes the graph, generates and simulates a two-layer QAOA circuit, then
//! compares the best sample with exhaustive search.
//!
//! Run with: cargo run --example qaoa_maxcut

use qsynth::opt::evaluator::{brute_force_minimum, sample_qaoa};
use qsynth::opt::qaoa::random_initial_parameters;
use qsynth::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("QAOA: MaxCut on a 4-cycle with one chord\n");

    let problem = QuantumOptimizationProblem::new(ProblemData::max_cut(&[
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (0, 2),
    ]));
    let qubo = problem.qubo().ok_or("problem not encoded")?;
    println!("Encoding: {qubo}");

    let (gamma, beta) = random_initial_parameters(2, Some(7));
    let circuit = problem.generate_qaoa_circuit(&gamma, &beta)?;
    let metrics = circuit.metrics();
    println!(
        "Circuit: {} gates, depth {}, {} CNOTs",
        metrics.total_gates, metrics.depth, metrics.cx_count
    );

    let optimized = circuit.optimize()?;
    println!("Optimized: {} gates", optimized.len());

    let config = SimulatorConfig::default().with_shots(2048).with_seed(7);
    if let Some(sample) = sample_qaoa(&problem, &gamma, &beta, config)? {
        println!(
            "Best sample: {} (energy {:.2}, seen {} times)",
            sample.solution.bitstring(),
            sample.solution.energy,
            sample.count
        );
    }

    let exact = brute_force_minimum(qubo)?;
    println!("Exhaustive optimum: {} (energy {:.2})", exact.bitstring(), exact.energy);
    Ok(())
}
