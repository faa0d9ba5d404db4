//! Combinatorial optimization problems
//!
//! A [`QuantumOptimizationProblem`] pairs typed [`ProblemData`] with the QUBO
//! encoding computed once at construction. Problems built from an incomplete
//! [`ParameterBag`] are kept but stay unencoded; callers check
//! [`is_qubo_formulated`](QuantumOptimizationProblem::is_qubo_formulated).

use crate::encoders::{self, ProblemEncoding};
use crate::error::{OptError, Result};
use crate::params::{to_index, to_integer, ParamValue, ParameterBag};
use crate::qaoa::{self, QaoaConfig};
use crate::qubo::{IsingModel, QuboMatrix};
use qsynth_core::QuantumCircuit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Supported problem families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    MaxCut,
    Tsp,
    Portfolio,
    Knapsack,
    VertexCover,
    GraphColoring,
    Sat,
    GenericQubo,
}

impl ProblemType {
    pub const ALL: [ProblemType; 8] = [
        ProblemType::MaxCut,
        ProblemType::Tsp,
        ProblemType::Portfolio,
        ProblemType::Knapsack,
        ProblemType::VertexCover,
        ProblemType::GraphColoring,
        ProblemType::Sat,
        ProblemType::GenericQubo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProblemType::MaxCut => "max_cut",
            ProblemType::Tsp => "tsp",
            ProblemType::Portfolio => "portfolio",
            ProblemType::Knapsack => "knapsack",
            ProblemType::VertexCover => "vertex_cover",
            ProblemType::GraphColoring => "graph_coloring",
            ProblemType::Sat => "sat",
            ProblemType::GenericQubo => "generic_qubo",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProblemType {
    type Err = OptError;

    /// Case-insensitive; `_`, `-` and spaces are ignored
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        ProblemType::ALL
            .into_iter()
            .find(|t| t.name().replace('_', "") == key)
            .ok_or_else(|| OptError::invalid_argument(format!("unknown problem type '{s}'")))
    }
}

/// Weighted undirected edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub weight: f64,
}

impl Edge {
    pub fn new(u: usize, v: usize) -> Self {
        Self::weighted(u, v, 1.0)
    }

    pub fn weighted(u: usize, v: usize, weight: f64) -> Self {
        Self { u, v, weight }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((u, v): (usize, usize)) -> Self {
        Edge::new(u, v)
    }
}

impl From<(usize, usize, f64)> for Edge {
    fn from((u, v, weight): (usize, usize, f64)) -> Self {
        Edge::weighted(u, v, weight)
    }
}

/// SAT literal over a zero-based variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub variable: usize,
    pub negated: bool,
}

impl Literal {
    pub fn positive(variable: usize) -> Self {
        Self {
            variable,
            negated: false,
        }
    }

    pub fn negative(variable: usize) -> Self {
        Self {
            variable,
            negated: true,
        }
    }

    /// DIMACS literal: `k` is variable `|k| - 1`, negated when `k < 0`
    pub fn from_dimacs(k: i64) -> Option<Self> {
        if k == 0 {
            return None;
        }
        let variable = usize::try_from(k.unsigned_abs() - 1).ok()?;
        Some(Self {
            variable,
            negated: k < 0,
        })
    }
}

/// Typed input for each problem family
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemData {
    MaxCut {
        num_vertices: usize,
        edges: Vec<Edge>,
    },
    Tsp {
        num_cities: usize,
        /// Kept for callers expanding the tour constraints themselves
        distances: Vec<Vec<f64>>,
    },
    Portfolio {
        returns: Vec<f64>,
        covariance: Vec<Vec<f64>>,
        risk_aversion: f64,
        budget: Option<f64>,
    },
    Knapsack {
        weights: Vec<f64>,
        values: Vec<f64>,
        capacity: f64,
    },
    VertexCover {
        num_vertices: usize,
        edges: Vec<(usize, usize)>,
    },
    GraphColoring {
        num_vertices: usize,
        edges: Vec<(usize, usize)>,
        num_colors: usize,
    },
    Sat {
        num_variables: usize,
        clauses: Vec<Vec<Literal>>,
    },
    GenericQubo {
        qubo: QuboMatrix,
    },
}

impl ProblemData {
    /// Unweighted MaxCut with the vertex count taken from the edges
    pub fn max_cut(edges: &[(usize, usize)]) -> Self {
        let edges: Vec<Edge> = edges.iter().copied().map(Edge::from).collect();
        ProblemData::MaxCut {
            num_vertices: vertex_count(edges.iter().map(|e| (e.u, e.v))),
            edges,
        }
    }

    pub fn vertex_cover(edges: &[(usize, usize)]) -> Self {
        ProblemData::VertexCover {
            num_vertices: vertex_count(edges.iter().copied()),
            edges: edges.to_vec(),
        }
    }

    pub fn graph_coloring(edges: &[(usize, usize)], num_colors: usize) -> Self {
        ProblemData::GraphColoring {
            num_vertices: vertex_count(edges.iter().copied()),
            edges: edges.to_vec(),
            num_colors,
        }
    }

    /// SAT from DIMACS clauses; the variable count covers every literal
    pub fn sat(clauses: &[Vec<i64>]) -> Self {
        let (num_variables, clauses) = dimacs_clauses(clauses);
        ProblemData::Sat {
            num_variables,
            clauses,
        }
    }

    pub fn problem_type(&self) -> ProblemType {
        match self {
            ProblemData::MaxCut { .. } => ProblemType::MaxCut,
            ProblemData::Tsp { .. } => ProblemType::Tsp,
            ProblemData::Portfolio { .. } => ProblemType::Portfolio,
            ProblemData::Knapsack { .. } => ProblemType::Knapsack,
            ProblemData::VertexCover { .. } => ProblemType::VertexCover,
            ProblemData::GraphColoring { .. } => ProblemType::GraphColoring,
            ProblemData::Sat { .. } => ProblemType::Sat,
            ProblemData::GenericQubo { .. } => ProblemType::GenericQubo,
        }
    }

    /// Read the fields `problem_type` needs from `bag`
    ///
    /// Returns `None` when a required field is missing or malformed.
    pub fn from_parameters(problem_type: ProblemType, bag: &ParameterBag) -> Option<Self> {
        let number = |key: &str| bag.get(key).and_then(ParamValue::as_number);
        let index = |key: &str| bag.get(key).and_then(ParamValue::as_usize);
        let list = |key: &str| bag.get(key).and_then(ParamValue::as_list).map(<[f64]>::to_vec);
        let matrix = |key: &str| bag.get(key).and_then(ParamValue::as_matrix);

        let data = match problem_type {
            ProblemType::MaxCut => {
                let edges = weighted_edges(&matrix("edges")?)?;
                let derived = vertex_count(edges.iter().map(|e| (e.u, e.v)));
                ProblemData::MaxCut {
                    num_vertices: index("num_vertices").unwrap_or(0).max(derived),
                    edges,
                }
            }
            ProblemType::Tsp => ProblemData::Tsp {
                num_cities: index("num_cities")?,
                distances: matrix("distances").unwrap_or_default(),
            },
            ProblemType::Portfolio => ProblemData::Portfolio {
                returns: list("returns")?,
                covariance: matrix("covariance")?,
                risk_aversion: number("risk_aversion")?,
                budget: number("budget"),
            },
            ProblemType::Knapsack => ProblemData::Knapsack {
                weights: list("weights")?,
                values: list("values")?,
                capacity: number("capacity")?,
            },
            ProblemType::VertexCover => {
                let edges = plain_edges(&matrix("edges")?)?;
                ProblemData::VertexCover {
                    num_vertices: index("num_vertices")
                        .unwrap_or(0)
                        .max(vertex_count(edges.iter().copied())),
                    edges,
                }
            }
            ProblemType::GraphColoring => {
                let edges = plain_edges(&matrix("edges")?)?;
                ProblemData::GraphColoring {
                    num_vertices: index("num_vertices")
                        .unwrap_or(0)
                        .max(vertex_count(edges.iter().copied())),
                    edges,
                    num_colors: index("num_colors")?,
                }
            }
            ProblemType::Sat => {
                let rows = matrix("clauses")?;
                let ints = rows
                    .iter()
                    .map(|row| row.iter().map(|&v| to_integer(v)).collect::<Option<Vec<_>>>())
                    .collect::<Option<Vec<_>>>()?;
                let (derived, clauses) = dimacs_clauses(&ints);
                ProblemData::Sat {
                    num_variables: index("num_variables").unwrap_or(0).max(derived),
                    clauses,
                }
            }
            ProblemType::GenericQubo => {
                let mut qubo = QuboMatrix::new(index("num_variables").unwrap_or(0));
                for row in matrix("qubo")? {
                    match row.as_slice() {
                        [i, j, coeff] => qubo.add(to_index(*i)?, to_index(*j)?, *coeff),
                        _ => return None,
                    }
                }
                ProblemData::GenericQubo { qubo }
            }
        };
        Some(data)
    }

    /// Scalar limits a caller may check solutions against
    fn constraints(&self) -> BTreeMap<String, f64> {
        let mut constraints = BTreeMap::new();
        match self {
            ProblemData::Knapsack { capacity, .. } => {
                constraints.insert("capacity".to_string(), *capacity);
            }
            ProblemData::Portfolio { budget: Some(b), .. } => {
                constraints.insert("budget".to_string(), *b);
            }
            ProblemData::GraphColoring { num_colors, .. } => {
                constraints.insert("num_colors".to_string(), *num_colors as f64);
            }
            ProblemData::Tsp { num_cities, .. } => {
                constraints.insert("num_cities".to_string(), *num_cities as f64);
            }
            _ => {}
        }
        constraints
    }
}

/// `1 + highest endpoint`, or 0 with no edges
///
/// Saturates; an oversized count is refused when the problem is encoded.
fn vertex_count(edges: impl Iterator<Item = (usize, usize)>) -> usize {
    edges.map(|(u, v)| u.max(v).saturating_add(1)).max().unwrap_or(0)
}

/// Literals of each clause plus the number of variables they mention
///
/// Zero entries, the DIMACS clause terminator, are dropped.
fn dimacs_clauses(clauses: &[Vec<i64>]) -> (usize, Vec<Vec<Literal>>) {
    let clauses: Vec<Vec<Literal>> = clauses
        .iter()
        .map(|c| c.iter().filter_map(|&k| Literal::from_dimacs(k)).collect())
        .collect();
    let num_variables = clauses
        .iter()
        .flatten()
        .map(|l| l.variable + 1)
        .max()
        .unwrap_or(0);
    (num_variables, clauses)
}

fn plain_edges(rows: &[Vec<f64>]) -> Option<Vec<(usize, usize)>> {
    rows.iter()
        .map(|row| match row.as_slice() {
            [u, v, ..] => Some((to_index(*u)?, to_index(*v)?)),
            _ => None,
        })
        .collect()
}

/// Rows of `[u, v]` or `[u, v, weight]`
fn weighted_edges(rows: &[Vec<f64>]) -> Option<Vec<Edge>> {
    rows.iter()
        .map(|row| match row.as_slice() {
            [u, v] => Some(Edge::new(to_index(*u)?, to_index(*v)?)),
            [u, v, w, ..] => Some(Edge::weighted(to_index(*u)?, to_index(*v)?, *w)),
            _ => None,
        })
        .collect()
}

/// Combinatorial problem with its QUBO encoding
///
/// # Example
/// ```
/// use qsynth_opt::{ProblemData, QuantumOptimizationProblem};
///
/// let problem = QuantumOptimizationProblem::new(ProblemData::max_cut(&[(0, 1), (1, 2), (0, 2)]));
/// assert!(problem.is_qubo_formulated());
/// assert_eq!(problem.evaluate_solution(&[1, 0, 0]), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumOptimizationProblem {
    problem_type: ProblemType,
    data: Option<ProblemData>,
    constraints: BTreeMap<String, f64>,
    encoding: Option<ProblemEncoding>,
}

impl QuantumOptimizationProblem {
    /// Encode typed problem data
    ///
    /// Data whose register would not fit is kept but left unencoded.
    pub fn new(data: ProblemData) -> Self {
        let problem_type = data.problem_type();
        let encoding = encoders::encode(&data);
        match &encoding {
            Some(encoding) => tracing::debug!(
                problem = %problem_type,
                variables = encoding.qubo.num_variables(),
                terms = encoding.qubo.len(),
                "problem encoded"
            ),
            None => tracing::debug!(
                problem = %problem_type,
                "register too wide, problem left unencoded"
            ),
        }
        Self {
            problem_type,
            constraints: data.constraints(),
            data: Some(data),
            encoding,
        }
    }

    /// Convert keyed input and encode it
    ///
    /// Missing or malformed fields leave the problem unencoded.
    pub fn from_parameters(problem_type: ProblemType, bag: &ParameterBag) -> Self {
        match ProblemData::from_parameters(problem_type, bag) {
            Some(data) => Self::new(data),
            None => {
                tracing::debug!(
                    problem = %problem_type,
                    keys = ?bag.keys().collect::<Vec<_>>(),
                    "required fields missing, problem left unencoded"
                );
                Self {
                    problem_type,
                    data: None,
                    constraints: BTreeMap::new(),
                    encoding: None,
                }
            }
        }
    }

    /// Parse a JSON object into a [`ParameterBag`] and convert it
    pub fn from_json(problem_type: ProblemType, json: &str) -> Result<Self> {
        let bag: ParameterBag = serde_json::from_str(json)
            .map_err(|e| OptError::invalid_argument(format!("malformed problem JSON: {e}")))?;
        Ok(Self::from_parameters(problem_type, &bag))
    }

    pub fn problem_type(&self) -> ProblemType {
        self.problem_type
    }

    pub fn data(&self) -> Option<&ProblemData> {
        self.data.as_ref()
    }

    pub fn constraints(&self) -> &BTreeMap<String, f64> {
        &self.constraints
    }

    pub fn encoding(&self) -> Option<&ProblemEncoding> {
        self.encoding.as_ref()
    }

    pub fn qubo(&self) -> Option<&QuboMatrix> {
        self.encoding.as_ref().map(|e| &e.qubo)
    }

    pub fn ising(&self) -> Option<&IsingModel> {
        self.encoding.as_ref().and_then(|e| e.ising.as_ref())
    }

    pub fn is_qubo_formulated(&self) -> bool {
        self.encoding.is_some()
    }

    pub fn is_ising_formulated(&self) -> bool {
        self.ising().is_some()
    }

    /// Width of the encoding, 0 when unencoded
    pub fn num_variables(&self) -> usize {
        self.qubo().map(QuboMatrix::num_variables).unwrap_or(0)
    }

    /// QUBO objective of `bits`, 0.0 when unencoded
    pub fn evaluate_solution(&self, bits: &[u8]) -> f64 {
        self.qubo().map(|q| q.evaluate(bits)).unwrap_or(0.0)
    }

    /// QAOA circuit with `min(gamma.len(), beta.len())` layers
    ///
    /// # Errors
    /// [`OptError::IllegalState`] if the problem is not encoded.
    pub fn generate_qaoa_circuit(&self, gamma: &[f64], beta: &[f64]) -> Result<QuantumCircuit> {
        self.generate_qaoa_circuit_with(gamma, beta, &QaoaConfig::default())
    }

    pub fn generate_qaoa_circuit_with(
        &self,
        gamma: &[f64],
        beta: &[f64],
        config: &QaoaConfig,
    ) -> Result<QuantumCircuit> {
        let qubo = self.qubo().ok_or_else(|| {
            OptError::illegal_state(format!(
                "{} problem is not QUBO-formulated",
                self.problem_type
            ))
        })?;
        qaoa::qaoa_circuit(qubo, gamma, beta, config)
    }
}
