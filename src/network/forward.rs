use crate::activation::activation::{softmax_rows, ActivationFunction};
use crate::math::matrix::Matrix;
use crate::network::parameters::ParameterStore;

/// Everything one forward pass produces for the backward pass.
///
/// `activations` holds a_0..a_L (a_0 is the input batch); `pre_activations`
/// holds z_1..z_L, so `pre_activations[i]` produced `activations[i + 1]`.
#[derive(Debug, Clone)]
pub struct ForwardCache {
    pub activations: Vec<Matrix>,
    pub pre_activations: Vec<Matrix>,
}

impl ForwardCache {
    /// Softmax probabilities of the output layer.
    pub fn output(&self) -> &Matrix {
        // a_0 is always present, so this never underflows.
        &self.activations[self.activations.len() - 1]
    }

    pub fn into_output(mut self) -> Matrix {
        self.activations.pop().unwrap_or_default()
    }

    pub fn batch_size(&self) -> usize {
        self.activations[0].rows
    }
}

/// Runs `input` through every layer.
///
/// Hidden layers use `activation`; the last layer always uses softmax. The
/// caller is responsible for `input.cols` matching the first layer.
pub fn forward(params: &ParameterStore, activation: ActivationFunction, input: &Matrix) -> ForwardCache {
    let layers = params.layers();
    let mut activations = Vec::with_capacity(layers.len() + 1);
    let mut pre_activations = Vec::with_capacity(layers.len());
    activations.push(input.clone());

    for (i, layer) in layers.iter().enumerate() {
        let z = layer.linear(&activations[i]);
        let a = if i + 1 == layers.len() {
            softmax_rows(&z)
        } else {
            activation.apply(&z)
        };
        pre_activations.push(z);
        activations.push(a);
    }

    ForwardCache { activations, pre_activations }
}
