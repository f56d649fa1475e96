use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NetworkError;
use crate::math::matrix::Matrix;

/// Magnitude beyond which sigmoid inputs are clamped so `exp` cannot overflow.
const SIGMOID_CLAMP: f64 = 500.0;

/// Hidden-layer activation. The output layer is always softmax and is not
/// selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
}

impl ActivationFunction {
    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::ReLU => relu(x),
        }
    }

    pub fn apply(&self, z: &Matrix) -> Matrix {
        z.map(|x| self.function(x))
    }

    /// Element-wise derivative for a whole layer.
    ///
    /// Sigmoid is differentiated through its output `a`, ReLU through its
    /// pre-activation `z`; both are cached by the forward pass so each mode
    /// picks the one it needs.
    pub fn derivative(&self, z: &Matrix, a: &Matrix) -> Matrix {
        match self {
            ActivationFunction::Sigmoid => a.map(|a| a * (1.0 - a)),
            ActivationFunction::ReLU => z.map(|z| if z > 0.0 { 1.0 } else { 0.0 }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::ReLU => "relu",
        }
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivationFunction {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "relu" => Ok(ActivationFunction::ReLU),
            other => Err(NetworkError::config(format!(
                "unrecognized activation mode `{other}` (expected `sigmoid` or `relu`)"
            ))),
        }
    }
}

/// Logistic function with the input clamped to `[-500, 500]`.
pub fn sigmoid(z: f64) -> f64 {
    let z = z.clamp(-SIGMOID_CLAMP, SIGMOID_CLAMP);
    1.0 / (1.0 + (-z).exp())
}

pub fn relu(z: f64) -> f64 {
    if z > 0.0 { z } else { 0.0 }
}

/// Softmax of a single row, shifted by the row maximum before exponentiating.
pub fn softmax(row: &[f64]) -> Vec<f64> {
    let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = row.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Row-wise softmax over a batch of logits.
pub fn softmax_rows(z: &Matrix) -> Matrix {
    z.map_rows(softmax)
}
