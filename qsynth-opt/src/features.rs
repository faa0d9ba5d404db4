//! Classical data loading and small variational classifiers
//!
//! One qubit per feature. The encodings:
//! - angle: `RY(π·x)`
//! - amplitude: the feature vector is normalised and each qubit gets
//!   `RY(2·asin|x̂|)`, a product-state approximation
//! - basis: `X` on qubits whose feature exceeds `0.5`

use crate::error::{OptError, Result};
use qsynth_core::QuantumCircuit;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Basis-encoding threshold
pub const BASIS_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureEncoding {
    #[default]
    Angle,
    Amplitude,
    Basis,
}

impl FeatureEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureEncoding::Angle => "angle",
            FeatureEncoding::Amplitude => "amplitude",
            FeatureEncoding::Basis => "basis",
        }
    }
}

impl fmt::Display for FeatureEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `angle`, `angle_encoding` and the like, case-insensitively
impl FromStr for FeatureEncoding {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.strip_suffix("_encoding").unwrap_or(&lower) {
            "angle" => Ok(FeatureEncoding::Angle),
            "amplitude" => Ok(FeatureEncoding::Amplitude),
            "basis" => Ok(FeatureEncoding::Basis),
            _ => Err(OptError::invalid_argument(format!("unknown feature encoding '{s}'"))),
        }
    }
}

/// Load `features` onto qubits `0..features.len()` of `circuit`
pub fn append_feature_encoding(
    circuit: &mut QuantumCircuit,
    features: &[f64],
    encoding: FeatureEncoding,
) -> Result<()> {
    if let Some(bad) = features.iter().find(|x| !x.is_finite()) {
        return Err(OptError::invalid_argument(format!("feature {bad} is not finite")));
    }
    match encoding {
        FeatureEncoding::Angle => {
            for (q, &x) in features.iter().enumerate() {
                circuit.ry(q, PI * x)?;
            }
        }
        FeatureEncoding::Amplitude => {
            let norm = features.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm == 0.0 {
                return Err(OptError::invalid_argument("amplitude encoding of a zero vector"));
            }
            for (q, &x) in features.iter().enumerate() {
                circuit.ry(q, 2.0 * (x / norm).abs().asin())?;
            }
        }
        FeatureEncoding::Basis => {
            for (q, &x) in features.iter().enumerate() {
                if x > BASIS_THRESHOLD {
                    circuit.x(q)?;
                }
            }
        }
    }
    Ok(())
}

/// Circuit holding only the encoded features
pub fn encode_features(features: &[f64], encoding: FeatureEncoding) -> Result<QuantumCircuit> {
    if features.is_empty() {
        return Err(OptError::invalid_argument("no features to encode"));
    }
    let mut circuit = QuantumCircuit::new(features.len());
    append_feature_encoding(&mut circuit, features, encoding)?;
    Ok(circuit)
}

/// Encoded features, one trainable layer, then measurement
///
/// The layer applies `RY` then `RZ` per qubit while weights last, followed
/// by a `CNOT` ladder. Surplus weights are ignored.
///
/// # Example
/// ```
/// use qsynth_opt::features::{qml_circuit, FeatureEncoding};
///
/// let circuit = qml_circuit(&[0.2, 0.9], &[0.1, 0.2, 0.3], FeatureEncoding::Basis).unwrap();
/// assert_eq!(circuit.gate_counts()["x"], 1);
/// assert_eq!(circuit.gate_counts()["ry"], 2);
/// assert_eq!(circuit.gate_counts()["rz"], 1);
/// ```
pub fn qml_circuit(features: &[f64], weights: &[f64], encoding: FeatureEncoding) -> Result<QuantumCircuit> {
    let mut circuit = encode_features(features, encoding)?;
    let n = features.len();

    let mut weights = weights.iter().copied();
    for q in 0..n {
        let Some(ry) = weights.next() else { break };
        circuit.ry(q, ry)?;
        if let Some(rz) = weights.next() {
            circuit.rz(q, rz)?;
        }
    }
    for q in 1..n {
        circuit.cnot(q - 1, q)?;
    }
    circuit.measure_all();

    tracing::debug!(
        qubits = n,
        encoding = %encoding,
        gates = circuit.len(),
        "generated classifier circuit"
    );
    Ok(circuit)
}
