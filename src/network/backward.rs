use crate::activation::activation::ActivationFunction;
use crate::layers::dense::LayerGradient;
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::forward::ForwardCache;
use crate::network::parameters::ParameterStore;

/// Per-layer gradients of the mean cross-entropy loss, in layer order.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub layers: Vec<LayerGradient>,
}

/// Backpropagates the softmax + cross-entropy error through every layer.
///
/// `targets` must be a one-hot matrix shaped like the cache's output; labels
/// are validated before this is reached. Parameters are only read, for the
/// `W_iᵀ` products.
pub fn backward(
    params: &ParameterStore,
    activation: ActivationFunction,
    cache: &ForwardCache,
    targets: &Matrix,
) -> Gradients {
    let layers = params.layers();
    let inv_batch = 1.0 / cache.batch_size() as f64;

    // Softmax and cross-entropy composed: dL/dz_L = a_L - y.
    let mut delta = CrossEntropyLoss::derivative(cache.output(), targets);
    let mut grads = Vec::with_capacity(layers.len());

    for i in (0..layers.len()).rev() {
        let input = &cache.activations[i];
        grads.push(LayerGradient {
            weights: (&input.transpose() * &delta).scale(inv_batch),
            biases: delta.column_sums().scale(inv_batch),
        });

        if i > 0 {
            let act_derivative = activation.derivative(&cache.pre_activations[i - 1], input);
            delta = (&delta * &layers[i].weights.transpose()).hadamard(&act_derivative);
        }
    }

    grads.reverse();
    Gradients { layers: grads }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::forward::forward;

    fn loss_at(params: &ParameterStore, mode: ActivationFunction, x: &Matrix, y: &Matrix) -> f64 {
        let cache = forward(params, mode, x);
        CrossEntropyLoss::loss(cache.output(), y)
    }

    fn batch() -> (Matrix, Matrix) {
        let x = Matrix::from_rows(vec![
            vec![0.5, -1.2, 0.3],
            vec![-0.7, 0.8, 1.5],
            vec![1.1, 0.2, -0.4],
            vec![-0.3, -0.9, 0.6],
            vec![0.9, 1.3, -1.1],
        ]).unwrap();
        let y = Matrix::from_rows(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0],
        ]).unwrap();
        (x, y)
    }

    /// Compares every analytic partial derivative with a central difference.
    fn check_gradients(architecture: &[usize], mode: ActivationFunction, seed: u64) {
        const H: f64 = 1e-5;
        let (x, y) = batch();
        let mut params = ParameterStore::initialize(architecture, mode, seed);
        // Non-zero biases so the bias path is exercised away from the origin.
        for (l, layer) in params.layers_mut().iter_mut().enumerate() {
            layer.biases = layer.biases.map(|_| 0.05 * (l as f64 + 1.0));
        }

        let cache = forward(&params, mode, &x);
        let grads = backward(&params, mode, &cache, &y);
        assert_eq!(grads.layers.len(), params.len());

        let assert_close = |analytic: f64, numeric: f64, what: &str| {
            let denom = (analytic.abs() + numeric.abs()).max(1e-8);
            let rel = (analytic - numeric).abs() / denom;
            assert!(
                rel < 1e-4 || (analytic - numeric).abs() < 1e-9,
                "{what}: analytic {analytic} vs numeric {numeric} (rel {rel})"
            );
        };

        for l in 0..params.len() {
            let (rows, cols) = params.layers()[l].weights.shape();
            for r in 0..rows {
                for c in 0..cols {
                    let original = params.layers()[l].weights.get(r, c);
                    params.layers_mut()[l].weights.set(r, c, original + H);
                    let plus = loss_at(&params, mode, &x, &y);
                    params.layers_mut()[l].weights.set(r, c, original - H);
                    let minus = loss_at(&params, mode, &x, &y);
                    params.layers_mut()[l].weights.set(r, c, original);

                    let numeric = (plus - minus) / (2.0 * H);
                    assert_close(grads.layers[l].weights.get(r, c), numeric, "weight");
                }
            }
            for c in 0..params.layers()[l].biases.cols {
                let original = params.layers()[l].biases.get(0, c);
                params.layers_mut()[l].biases.set(0, c, original + H);
                let plus = loss_at(&params, mode, &x, &y);
                params.layers_mut()[l].biases.set(0, c, original - H);
                let minus = loss_at(&params, mode, &x, &y);
                params.layers_mut()[l].biases.set(0, c, original);

                let numeric = (plus - minus) / (2.0 * H);
                assert_close(grads.layers[l].biases.get(0, c), numeric, "bias");
            }
        }
    }

    #[test]
    fn sigmoid_gradients_match_finite_differences() {
        check_gradients(&[3, 4, 2], ActivationFunction::Sigmoid, 3);
    }

    #[test]
    fn relu_gradients_match_finite_differences() {
        check_gradients(&[3, 4, 2], ActivationFunction::ReLU, 11);
    }

    #[test]
    fn deeper_networks_backpropagate_through_every_layer() {
        check_gradients(&[3, 5, 4, 2], ActivationFunction::Sigmoid, 21);
        check_gradients(&[3, 5, 4, 2], ActivationFunction::ReLU, 22);
    }

    #[test]
    fn gradient_shapes_mirror_parameters() {
        let (x, y) = batch();
        let params = ParameterStore::initialize(&[3, 6, 5, 2], ActivationFunction::ReLU, 1);
        let cache = forward(&params, ActivationFunction::ReLU, &x);
        let grads = backward(&params, ActivationFunction::ReLU, &cache, &y);
        for (g, layer) in grads.layers.iter().zip(params.layers()) {
            assert_eq!(g.weights.shape(), layer.weights.shape());
            assert_eq!(g.biases.shape(), layer.biases.shape());
        }
    }

    #[test]
    fn output_bias_gradient_is_mean_error() {
        let (x, y) = batch();
        let params = ParameterStore::initialize(&[3, 2], ActivationFunction::Sigmoid, 5);
        let cache = forward(&params, ActivationFunction::Sigmoid, &x);
        let grads = backward(&params, ActivationFunction::Sigmoid, &cache, &y);

        let out = cache.output();
        for c in 0..2 {
            let mean: f64 = (0..out.rows).map(|r| out.get(r, c) - y.get(r, c)).sum::<f64>() / out.rows as f64;
            assert!((grads.layers[0].biases.get(0, c) - mean).abs() < 1e-12);
        }
    }
}
