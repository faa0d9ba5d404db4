use approx::assert_relative_eq;
use qsynth_opt::evaluator::MAX_EXHAUSTIVE_VARIABLES;
use qsynth_opt::{
    brute_force_minimum, AnnealerConfig, OptError, ProblemData, ProblemType, QuantumOptimizationProblem,
    QuboMatrix, SimulatedAnnealer,
};

#[test]
fn max_cut_triangle_from_json() {
    let problem = QuantumOptimizationProblem::from_json(
        ProblemType::MaxCut,
        r#"{"edges": [[0, 1], [1, 2], [0, 2]]}"#,
    )
    .unwrap();

    assert!(problem.is_qubo_formulated());
    assert!(problem.is_ising_formulated());
    let qubo = problem.qubo().unwrap();
    for i in 0..3 {
        assert_eq!(qubo.get(i, i), 2.0);
    }
    for (i, j) in [(0, 1), (1, 2), (0, 2)] {
        assert_eq!(qubo.get(i, j), -2.0);
    }
    let ising = problem.ising().unwrap();
    assert!(ising.couplings.values().all(|&j| j == -0.25));
    assert!(ising.fields.iter().all(|&h| h == 0.0));
}

#[test]
fn evaluate_solution_on_generic_qubo() {
    let problem = QuantumOptimizationProblem::new(ProblemData::GenericQubo {
        qubo: QuboMatrix::from_terms(2, [(0, 0, 1.0), (1, 1, 1.0), (0, 1, -2.0)]),
    });
    assert_eq!(problem.evaluate_solution(&[1, 1]), 0.0);
    assert_eq!(problem.evaluate_solution(&[1, 0]), 1.0);
    // entries past the supplied bits are skipped
    assert_eq!(problem.evaluate_solution(&[1]), 1.0);
}

#[test]
fn every_type_encodes_or_stays_unencoded() {
    for problem_type in ProblemType::ALL {
        let empty = QuantumOptimizationProblem::from_parameters(problem_type, &Default::default());
        assert!(!empty.is_qubo_formulated(), "{problem_type} encoded without input");
        assert_eq!(empty.problem_type(), problem_type);
    }
}

#[test]
fn unencoded_problem_cannot_generate_qaoa() {
    let problem = QuantumOptimizationProblem::from_json(ProblemType::Portfolio, r#"{"returns": [0.1]}"#)
        .unwrap();
    let err = problem.generate_qaoa_circuit(&[0.1], &[0.2]).unwrap_err();
    assert!(matches!(err, OptError::IllegalState(_)));
}

#[test]
fn knapsack_optimum_respects_capacity() {
    let problem = QuantumOptimizationProblem::from_json(
        ProblemType::Knapsack,
        r#"{"weights": [2, 3, 4], "values": [3, 4, 5], "capacity": 5}"#,
    )
    .unwrap();
    let best = brute_force_minimum(problem.qubo().unwrap()).unwrap();
    // items 0 and 1 fill the sack exactly with the highest value
    assert_eq!(best.bits, vec![1, 1, 0]);

    let offset = problem.encoding().unwrap().metadata["offset"];
    assert_relative_eq!(best.energy + offset, -7.0, epsilon = 1e-9);
}

#[test]
fn vertex_cover_of_a_path() {
    let problem = QuantumOptimizationProblem::new(ProblemData::vertex_cover(&[(0, 1), (1, 2)]));
    assert_eq!(problem.num_variables(), 3);
    assert_eq!(problem.encoding().unwrap().penalty_weight(), Some(30.0));
    // covering the middle vertex alone is cheaper than covering both ends
    assert!(problem.evaluate_solution(&[0, 1, 0]) < problem.evaluate_solution(&[1, 0, 1]));
}

#[test]
fn graph_coloring_parameters() {
    let problem = QuantumOptimizationProblem::from_json(
        ProblemType::GraphColoring,
        r#"{"edges": [[0, 1]], "num_colors": 3}"#,
    )
    .unwrap();
    assert_eq!(problem.num_variables(), 6);
    assert_eq!(problem.constraints()["num_colors"], 3.0);
}

#[test]
fn tsp_reserves_square_register() {
    let problem =
        QuantumOptimizationProblem::from_json(ProblemType::Tsp, r#"{"num_cities": 4}"#).unwrap();
    assert!(problem.is_qubo_formulated());
    assert_eq!(problem.num_variables(), 16);
    assert_eq!(problem.encoding().unwrap().penalty_weight(), Some(1000.0));
    assert!(problem.qubo().unwrap().is_empty());
}

#[test]
fn annealer_agrees_with_exhaustive_search_on_max_cut() {
    let problem = QuantumOptimizationProblem::new(ProblemData::max_cut(&[
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (0, 2),
    ]));
    let qubo = problem.qubo().unwrap();
    assert!(qubo.num_variables() <= MAX_EXHAUSTIVE_VARIABLES);
    let exact = brute_force_minimum(qubo).unwrap();
    let sampled = SimulatedAnnealer::new(AnnealerConfig::default().with_seed(5))
        .sample(qubo)
        .unwrap();
    assert_relative_eq!(sampled.best().unwrap().energy, exact.energy);
}

#[test]
fn oversized_sizes_leave_problem_unencoded() {
    let max_cut =
        QuantumOptimizationProblem::from_json(ProblemType::MaxCut, r#"{"edges": [[1e300, 0]]}"#)
            .unwrap();
    assert!(!max_cut.is_qubo_formulated());
    assert!(max_cut.data().is_none());

    let tsp = QuantumOptimizationProblem::from_json(ProblemType::Tsp, r#"{"num_cities": 1e10}"#)
        .unwrap();
    assert!(!tsp.is_qubo_formulated());

    // fits an index but not a register
    let wide = QuantumOptimizationProblem::from_json(ProblemType::Tsp, r#"{"num_cities": 100000}"#)
        .unwrap();
    assert!(wide.data().is_some());
    assert!(!wide.is_qubo_formulated());
    assert_eq!(wide.num_variables(), 0);

    let coloring = QuantumOptimizationProblem::from_json(
        ProblemType::GraphColoring,
        r#"{"edges": [[0, 4000000000]], "num_colors": 4000000000}"#,
    )
    .unwrap();
    assert!(!coloring.is_qubo_formulated());
}
