use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::layers::init::initialize_layers;

/// Ordered per-layer weights and biases of a network.
///
/// Sized once from the architecture and never resized; only the optimizer
/// writes to it after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterStore {
    layers: Vec<Layer>,
}

impl ParameterStore {
    /// Allocates and seeds parameters for `architecture`.
    pub fn initialize(architecture: &[usize], activation: ActivationFunction, seed: u64) -> ParameterStore {
        ParameterStore {
            layers: initialize_layers(architecture, activation, seed),
        }
    }

    pub fn from_layers(layers: Vec<Layer>) -> ParameterStore {
        ParameterStore { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable view of the layer records. The slice length cannot change.
    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub(crate) fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks that every weight and bias shape matches adjacent widths of `architecture`.
    pub fn check_shapes(&self, architecture: &[usize]) -> Result<()> {
        let transitions = architecture.len().saturating_sub(1);
        if self.layers.len() != transitions {
            return Err(NetworkError::ShapeMismatch {
                what: "layer count",
                got: self.layers.len(),
                expected: transitions,
            });
        }
        for (layer, pair) in self.layers.iter().zip(architecture.windows(2)) {
            let (fan_in, fan_out) = (pair[0], pair[1]);
            if layer.input_size() != fan_in {
                return Err(NetworkError::ShapeMismatch { what: "weight rows", got: layer.input_size(), expected: fan_in });
            }
            if layer.size() != fan_out {
                return Err(NetworkError::ShapeMismatch { what: "weight columns", got: layer.size(), expected: fan_out });
            }
            if layer.biases.rows != 1 {
                return Err(NetworkError::ShapeMismatch { what: "bias rows", got: layer.biases.rows, expected: 1 });
            }
            if layer.biases.cols != fan_out {
                return Err(NetworkError::ShapeMismatch { what: "bias columns", got: layer.biases.cols, expected: fan_out });
            }
            if layer.weights.data.len() != fan_in || layer.biases.data.len() != 1 {
                return Err(NetworkError::ShapeMismatch { what: "parameter row count", got: layer.weights.data.len(), expected: fan_in });
            }
            let bad_row = layer.weights.data.iter()
                .chain(layer.biases.data.iter())
                .find(|row| row.len() != fan_out);
            if let Some(row) = bad_row {
                return Err(NetworkError::ShapeMismatch { what: "parameter row length", got: row.len(), expected: fan_out });
            }
        }
        Ok(())
    }
}
