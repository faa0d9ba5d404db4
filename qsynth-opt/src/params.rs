//! Loosely typed problem input
//!
//! Callers that hold problem data as keyed JSON-like values hand it over as a
//! [`ParameterBag`]. It is converted into typed
//! [`ProblemData`](crate::problem::ProblemData) straight away and never stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keyed problem input
pub type ParameterBag = BTreeMap<String, ParamValue>;

/// A single input value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
    List(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Non-negative whole number
    pub fn as_usize(&self) -> Option<usize> {
        self.as_number().and_then(to_index)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            ParamValue::List(v) => Some(v),
            _ => None,
        }
    }

    /// Rows of the value; an empty list reads as an empty matrix
    pub fn as_matrix(&self) -> Option<Vec<Vec<f64>>> {
        match self {
            ParamValue::Matrix(rows) => Some(rows.clone()),
            ParamValue::List(v) if v.is_empty() => Some(Vec::new()),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(value: Vec<f64>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<Vec<f64>>> for ParamValue {
    fn from(value: Vec<Vec<f64>>) -> Self {
        ParamValue::Matrix(value)
    }
}

/// Largest magnitude accepted for indices and counts read from a bag
pub const MAX_INDEX: f64 = u32::MAX as f64;

/// Whole, non-negative `f64` no larger than [`MAX_INDEX`] as an index
pub(crate) fn to_index(value: f64) -> Option<usize> {
    (value.fract() == 0.0 && (0.0..=MAX_INDEX).contains(&value)).then_some(value as usize)
}

/// Whole `f64` within `±MAX_INDEX` as a signed integer
pub(crate) fn to_integer(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() <= MAX_INDEX).then_some(value as i64)
}
