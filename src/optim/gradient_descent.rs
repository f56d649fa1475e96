use crate::network::backward::Gradients;
use crate::network::parameters::ParameterStore;

/// Plain full-batch gradient descent: no momentum, no adaptive rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    pub learning_rate: f64,
}

impl GradientDescent {
    pub fn new(learning_rate: f64) -> GradientDescent {
        GradientDescent { learning_rate }
    }

    /// Applies `W -= lr * dW` and `b -= lr * db` to every layer.
    pub fn step(&self, params: &mut ParameterStore, grads: &Gradients) {
        debug_assert_eq!(params.len(), grads.layers.len(), "one gradient per layer");
        for (layer, grad) in params.layers_mut().iter_mut().zip(&grads.layers) {
            layer.apply_gradients(grad, self.learning_rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::dense::LayerGradient;
    use crate::math::matrix::Matrix;
    use crate::activation::activation::ActivationFunction;

    #[test]
    fn step_moves_every_layer_by_lr_times_gradient() {
        let mut params = ParameterStore::initialize(&[2, 3, 2], ActivationFunction::Sigmoid, 9);
        let before = params.clone();
        let grads = Gradients {
            layers: params.layers().iter()
                .map(|l| LayerGradient {
                    weights: l.weights.map(|_| 1.0),
                    biases: l.biases.map(|_| -2.0),
                })
                .collect(),
        };

        GradientDescent::new(0.5).step(&mut params, &grads);

        for (after, prev) in params.layers().iter().zip(before.layers()) {
            let expected_w = prev.weights.map(|w| w - 0.5);
            for (a, e) in after.weights.data.iter().flatten().zip(expected_w.data.iter().flatten()) {
                assert!((a - e).abs() < 1e-12);
            }
            assert_eq!(after.biases, Matrix::zeros(1, prev.biases.cols).map(|_| 1.0));
        }
    }
}
