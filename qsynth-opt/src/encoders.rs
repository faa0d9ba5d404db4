//! Per-problem QUBO encoders
//!
//! Every encoder accumulates into a canonical upper-triangular [`QuboMatrix`]
//! and records the constants it used (penalty weights, offsets) in the
//! encoding metadata. SAT and TSP are deliberately coarse:
//! - SAT scores each literal on its own and ignores clause structure
//! - TSP reserves the `n²` position×city variables and leaves the tour
//!   constraints to the caller, who reads the penalty from the metadata

use crate::problem::{Edge, Literal, ProblemData};
use crate::qubo::{canonical, IsingModel, QuboMatrix};
use std::collections::BTreeMap;

/// Penalty recorded for callers expanding TSP constraints
pub const TSP_PENALTY: f64 = 1000.0;

/// Ising coupling per unit edge weight for MaxCut
pub const MAX_CUT_COUPLING: f64 = -0.25;

pub const PENALTY_KEY: &str = "penalty_weight";
pub const NUM_VARIABLES_KEY: &str = "num_variables";
pub const OFFSET_KEY: &str = "offset";

/// Widest register an encoder will build
pub const MAX_VARIABLES: usize = 1 << 24;

/// Output of an encoder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemEncoding {
    pub qubo: QuboMatrix,
    /// Only MaxCut emits a spin model directly
    pub ising: Option<IsingModel>,
    pub metadata: BTreeMap<String, f64>,
    /// How a bit assignment reads as a solution
    pub interpretation: String,
}

impl ProblemEncoding {
    fn new(qubo: QuboMatrix, interpretation: &str) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(NUM_VARIABLES_KEY.to_string(), qubo.num_variables() as f64);
        Self {
            qubo,
            ising: None,
            metadata,
            interpretation: interpretation.to_string(),
        }
    }

    fn with_metadata(mut self, key: &str, value: f64) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    pub fn penalty_weight(&self) -> Option<f64> {
        self.metadata.get(PENALTY_KEY).copied()
    }
}

/// Encode typed problem data
///
/// Returns `None` when the register would be wider than [`MAX_VARIABLES`].
pub fn encode(data: &ProblemData) -> Option<ProblemEncoding> {
    if register_width(data)? > MAX_VARIABLES {
        return None;
    }
    let encoding = match data {
        ProblemData::MaxCut {
            num_vertices,
            edges,
        } => encode_max_cut(*num_vertices, edges),
        ProblemData::Tsp { num_cities, .. } => encode_tsp(*num_cities)?,
        ProblemData::Portfolio {
            returns,
            covariance,
            risk_aversion,
            budget,
        } => encode_portfolio(returns, covariance, *risk_aversion, *budget),
        ProblemData::Knapsack {
            weights,
            values,
            capacity,
        } => encode_knapsack(weights, values, *capacity),
        ProblemData::VertexCover {
            num_vertices,
            edges,
        } => encode_vertex_cover(*num_vertices, edges),
        ProblemData::GraphColoring {
            num_vertices,
            edges,
            num_colors,
        } => encode_graph_coloring(*num_vertices, edges, *num_colors)?,
        ProblemData::Sat {
            num_variables,
            clauses,
        } => encode_sat(*num_variables, clauses),
        ProblemData::GenericQubo { qubo } => {
            ProblemEncoding::new(qubo.clone(), "caller-defined binary variables")
        }
    };
    Some(encoding)
}

/// Variables `data` needs, `None` if the count overflows
fn register_width(data: &ProblemData) -> Option<usize> {
    match data {
        ProblemData::MaxCut {
            num_vertices,
            edges,
        } => vertex_width(*num_vertices, edges.iter().map(|e| (e.u, e.v))),
        ProblemData::VertexCover {
            num_vertices,
            edges,
        } => vertex_width(*num_vertices, edges.iter().copied()),
        ProblemData::GraphColoring {
            num_vertices,
            edges,
            num_colors,
        } => vertex_width(*num_vertices, edges.iter().copied())?.checked_mul(*num_colors),
        ProblemData::Tsp { num_cities, .. } => num_cities.checked_mul(*num_cities),
        ProblemData::Portfolio { returns, .. } => Some(returns.len()),
        ProblemData::Knapsack { weights, .. } => Some(weights.len()),
        ProblemData::Sat {
            num_variables,
            clauses,
        } => clauses.iter().flatten().try_fold(*num_variables, |width, literal| {
            Some(width.max(literal.variable.checked_add(1)?))
        }),
        ProblemData::GenericQubo { qubo } => qubo
            .iter()
            .try_fold(qubo.declared_variables(), |width, ((_, j), _)| {
                Some(width.max(j.checked_add(1)?))
            }),
    }
}

/// `num_vertices` widened to cover every edge endpoint
fn vertex_width(num_vertices: usize, mut edges: impl Iterator<Item = (usize, usize)>) -> Option<usize> {
    edges.try_fold(num_vertices, |width, (u, v)| Some(width.max(u.max(v).checked_add(1)?)))
}

/// `x_i = 1` puts vertex `i` on the far side of the cut
///
/// Each edge adds `w` to both endpoints' diagonal and `-2w` to the pair,
/// with Ising coupling `-w/4` and zero fields.
pub fn encode_max_cut(num_vertices: usize, edges: &[Edge]) -> ProblemEncoding {
    let mut qubo = QuboMatrix::new(num_vertices);
    let mut ising = IsingModel::new(num_vertices);
    for edge in edges {
        qubo.add_linear(edge.u, edge.weight);
        qubo.add_linear(edge.v, edge.weight);
        qubo.add_quadratic(edge.u, edge.v, -2.0 * edge.weight);
        *ising
            .couplings
            .entry(canonical(edge.u, edge.v))
            .or_insert(0.0) += MAX_CUT_COUPLING * edge.weight;
    }
    ising.fields.resize(qubo.num_variables(), 0.0);

    let mut encoding = ProblemEncoding::new(qubo, "x_i = 1 places vertex i in the second partition");
    encoding.ising = Some(ising);
    encoding
}

/// Reserves `n²` variables, `x[p·n + c] = 1` visiting city `c` at step `p`
///
/// `None` if `n²` overflows.
pub fn encode_tsp(num_cities: usize) -> Option<ProblemEncoding> {
    let qubo = QuboMatrix::new(num_cities.checked_mul(num_cities)?);
    let encoding = ProblemEncoding::new(qubo, "x[p * n + c] = 1 visits city c at tour position p")
        .with_metadata(PENALTY_KEY, TSP_PENALTY)
        .with_metadata("num_cities", num_cities as f64);
    Some(encoding)
}

/// Mean-variance selection: `-Σ r_i x_i + λ Σ_ij cov_ij x_i x_j`
///
/// Ragged covariance rows contribute only the entries they have.
pub fn encode_portfolio(
    returns: &[f64],
    covariance: &[Vec<f64>],
    risk_aversion: f64,
    budget: Option<f64>,
) -> ProblemEncoding {
    let n = returns.len();
    let mut qubo = QuboMatrix::new(n);
    for (i, r) in returns.iter().enumerate() {
        qubo.add_linear(i, -r);
    }
    for (i, row) in covariance.iter().enumerate().take(n) {
        for (j, cov) in row.iter().enumerate().take(n) {
            qubo.add(i, j, risk_aversion * cov);
        }
    }

    let encoding = ProblemEncoding::new(qubo, "x_i = 1 holds asset i")
        .with_metadata("risk_aversion", risk_aversion);
    match budget {
        Some(b) => encoding.with_metadata("budget", b),
        None => encoding,
    }
}

/// `-Σ v_i x_i + P (Σ w_i x_i - C)²` with `P = 2 Σ v`
///
/// The constant `P·C²` of the penalty is not part of the QUBO and is
/// recorded under `offset`.
pub fn encode_knapsack(weights: &[f64], values: &[f64], capacity: f64) -> ProblemEncoding {
    let n = weights.len();
    let penalty = 2.0 * values.iter().sum::<f64>();
    let mut qubo = QuboMatrix::new(n);

    for (i, v) in values.iter().enumerate().take(n) {
        qubo.add_linear(i, -v);
    }
    for (i, wi) in weights.iter().enumerate() {
        for (j, wj) in weights.iter().enumerate() {
            qubo.add(i, j, penalty * wi * wj);
        }
    }
    for (i, w) in weights.iter().enumerate() {
        qubo.add_linear(i, -2.0 * penalty * capacity * w);
    }

    ProblemEncoding::new(qubo, "x_i = 1 packs item i")
        .with_metadata(PENALTY_KEY, penalty)
        .with_metadata(OFFSET_KEY, penalty * capacity * capacity)
        .with_metadata("capacity", capacity)
}

/// `Σ x_i + P Σ_(i,j)∈E (x_i + x_j - 2 x_i x_j)` with `P = 10|V|`
pub fn encode_vertex_cover(num_vertices: usize, edges: &[(usize, usize)]) -> ProblemEncoding {
    let penalty = 10.0 * num_vertices as f64;
    let mut qubo = QuboMatrix::new(num_vertices);
    for v in 0..num_vertices {
        qubo.add_linear(v, 1.0);
    }
    for &(i, j) in edges {
        qubo.add_linear(i, penalty);
        qubo.add_linear(j, penalty);
        qubo.add_quadratic(i, j, -2.0 * penalty);
    }
    ProblemEncoding::new(qubo, "x_i = 1 puts vertex i in the cover").with_metadata(PENALTY_KEY, penalty)
}

/// One variable per vertex and colour, `x[v·k + c] = 1` colouring `v` with `c`
///
/// With `P = 10|V|k`: every colour of a vertex is rewarded `-P`, two colours
/// on one vertex cost `+P`, and adjacent vertices sharing a colour cost `+P`.
/// `None` if the `|V|·k` register width overflows.
pub fn encode_graph_coloring(
    num_vertices: usize,
    edges: &[(usize, usize)],
    num_colors: usize,
) -> Option<ProblemEncoding> {
    let k = num_colors;
    let penalty = 10.0 * num_vertices as f64 * k as f64;
    let width = vertex_width(num_vertices, edges.iter().copied())?.checked_mul(k)?;
    let var = |vertex: usize, color: usize| vertex * k + color;
    let mut qubo = QuboMatrix::new(width);

    for v in 0..num_vertices {
        for c1 in 0..k {
            qubo.add_linear(var(v, c1), -penalty);
            for c2 in c1 + 1..k {
                qubo.add_quadratic(var(v, c1), var(v, c2), penalty);
            }
        }
    }
    for &(u, v) in edges {
        for c in 0..k {
            qubo.add_quadratic(var(u, c), var(v, c), penalty);
        }
    }

    let encoding = ProblemEncoding::new(qubo, "x[v * k + c] = 1 gives vertex v colour c")
        .with_metadata(PENALTY_KEY, penalty)
        .with_metadata("num_colors", k as f64);
    Some(encoding)
}

/// Single-literal scoring with `P = 10·|clauses|`
///
/// A positive literal lowers its variable's diagonal by `P`, a negated one
/// raises it. Multi-literal clauses are not coupled.
pub fn encode_sat(num_variables: usize, clauses: &[Vec<Literal>]) -> ProblemEncoding {
    let penalty = 10.0 * clauses.len() as f64;
    let mut qubo = QuboMatrix::new(num_variables);
    for literal in clauses.iter().flatten() {
        let coeff = if literal.negated { penalty } else { -penalty };
        qubo.add_linear(literal.variable, coeff);
    }
    ProblemEncoding::new(qubo, "x_i = 1 sets variable i true").with_metadata(PENALTY_KEY, penalty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_max_cut_triangle() {
        let edges = [Edge::new(0, 1), Edge::new(1, 2), Edge::new(0, 2)];
        let encoding = encode_max_cut(3, &edges);
        let qubo = &encoding.qubo;
        for i in 0..3 {
            assert_eq!(qubo.get(i, i), 2.0);
        }
        assert_eq!(qubo.get(0, 1), -2.0);
        assert_eq!(qubo.get(1, 2), -2.0);
        assert_eq!(qubo.get(0, 2), -2.0);
        assert_eq!(qubo.len(), 6);

        let ising = encoding.ising.unwrap();
        assert_eq!(ising.couplings[&(0, 1)], -0.25);
        assert_eq!(ising.fields, vec![0.0; 3]);
    }

    #[test]
    fn test_weighted_max_cut() {
        let encoding = encode_max_cut(2, &[Edge::weighted(1, 0, 3.0)]);
        assert_eq!(encoding.qubo.get(0, 1), -6.0);
        assert_eq!(encoding.qubo.get(1, 1), 3.0);
        assert_eq!(encoding.ising.unwrap().couplings[&(0, 1)], -0.75);
    }

    #[test]
    fn test_tsp_reserves_variables() {
        let encoding = encode_tsp(3).unwrap();
        assert!(encoding.qubo.is_empty());
        assert_eq!(encoding.qubo.num_variables(), 9);
        assert_eq!(encoding.penalty_weight(), Some(TSP_PENALTY));
        assert_eq!(encoding.metadata[NUM_VARIABLES_KEY], 9.0);
    }

    #[test]
    fn test_portfolio() {
        let encoding = encode_portfolio(
            &[0.1, 0.2],
            &[vec![0.5, 0.1], vec![0.1, 0.4]],
            2.0,
            Some(1.0),
        );
        let qubo = &encoding.qubo;
        assert_relative_eq!(qubo.get(0, 0), -0.1 + 1.0);
        assert_relative_eq!(qubo.get(1, 1), -0.2 + 0.8);
        // both (0,1) and (1,0) fold onto the upper triangle
        assert_relative_eq!(qubo.get(0, 1), 0.4);
        assert_eq!(encoding.metadata["budget"], 1.0);
    }

    #[test]
    fn test_knapsack_penalty_expansion() {
        let weights = [1.0, 2.0];
        let values = [3.0, 1.0];
        let capacity = 2.0;
        let encoding = encode_knapsack(&weights, &values, capacity);
        let p = encoding.penalty_weight().unwrap();
        assert_eq!(p, 8.0);

        // QUBO plus offset equals the penalised objective for every assignment
        for index in 0..4u8 {
            let bits = [index & 1, (index >> 1) & 1];
            let load: f64 = bits.iter().zip(&weights).map(|(b, w)| f64::from(*b) * w).sum();
            let value: f64 = bits.iter().zip(&values).map(|(b, v)| f64::from(*b) * v).sum();
            let expected = -value + p * (load - capacity).powi(2);
            assert_relative_eq!(
                encoding.qubo.evaluate(&bits) + encoding.metadata[OFFSET_KEY],
                expected,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_vertex_cover() {
        let encoding = encode_vertex_cover(2, &[(0, 1)]);
        let qubo = &encoding.qubo;
        assert_eq!(encoding.penalty_weight(), Some(20.0));
        assert_eq!(qubo.get(0, 0), 21.0);
        assert_eq!(qubo.get(1, 1), 21.0);
        assert_eq!(qubo.get(0, 1), -40.0);
        assert_eq!(qubo.evaluate(&[1, 0]), 21.0);
        assert_eq!(qubo.evaluate(&[1, 1]), 2.0);
    }

    #[test]
    fn test_graph_coloring_layout() {
        let encoding = encode_graph_coloring(2, &[(0, 1)], 2).unwrap();
        let qubo = &encoding.qubo;
        let p = 40.0;
        assert_eq!(encoding.penalty_weight(), Some(p));
        assert_eq!(qubo.num_variables(), 4);
        assert_eq!(qubo.get(0, 0), -p);
        // vertex 0 colours 0 and 1
        assert_eq!(qubo.get(0, 1), p);
        // vertices 0 and 1 both colour 1
        assert_eq!(qubo.get(1, 3), p);
        // proper colouring scores lower than a clash
        assert!(qubo.evaluate(&[1, 0, 0, 1]) < qubo.evaluate(&[1, 0, 1, 0]));
    }

    #[test]
    fn test_overflowing_widths() {
        assert!(encode_tsp(usize::MAX).is_none());
        assert!(encode_graph_coloring(usize::MAX / 2, &[], 3).is_none());
        assert!(encode_graph_coloring(2, &[(usize::MAX, 0)], 2).is_none());
    }

    #[test]
    fn test_encode_rejects_wide_registers() {
        let tsp = ProblemData::Tsp {
            num_cities: 1 << 13,
            distances: vec![],
        };
        assert!(encode(&tsp).is_none());

        let qubo = QuboMatrix::from_terms(0, [(0, usize::MAX, 1.0)]);
        assert!(encode(&ProblemData::GenericQubo { qubo }).is_none());

        let small = ProblemData::Tsp {
            num_cities: 4,
            distances: vec![],
        };
        assert_eq!(encode(&small).unwrap().qubo.num_variables(), 16);
    }

    #[test]
    fn test_sat_single_literal() {
        let clauses = vec![
            vec![Literal::positive(0), Literal::negative(1)],
            vec![Literal::positive(1)],
        ];
        let encoding = encode_sat(3, &clauses);
        let qubo = &encoding.qubo;
        assert_eq!(encoding.penalty_weight(), Some(20.0));
        assert_eq!(qubo.get(0, 0), -20.0);
        // -P from clause 2, +P from clause 1
        assert_eq!(qubo.get(1, 1), 0.0);
        assert_eq!(qubo.num_variables(), 3);
    }
}
