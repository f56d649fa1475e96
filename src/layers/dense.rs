use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::layers::init::Initializer;
use crate::math::matrix::Matrix;

/// Parameters of one layer transition: `weights` is `input_size × size`,
/// `biases` is a `1 × size` row vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub weights: Matrix,
    pub biases: Matrix,
}

/// Gradients for one layer, shaped exactly like its `Layer`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradient {
    pub weights: Matrix,
    pub biases: Matrix,
}

impl Layer {
    /// Draws the weights from `rng` with the initializer's scale; biases start at zero.
    pub fn new<R: Rng>(input_size: usize, size: usize, init: Initializer, rng: &mut R) -> Layer {
        Layer {
            weights: Matrix::normal(input_size, size, init.std_dev(input_size), rng),
            biases: Matrix::zeros(1, size),
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn size(&self) -> usize {
        self.weights.cols
    }

    /// Pre-activation for a batch: `z = input · W + b`.
    pub fn linear(&self, input: &Matrix) -> Matrix {
        (input * &self.weights).add_row(&self.biases)
    }

    /// Applies pre-computed gradients scaled by lr.
    pub fn apply_gradients(&mut self, grad: &LayerGradient, lr: f64) {
        self.weights.scaled_sub_assign(lr, &grad.weights);
        self.biases.scaled_sub_assign(lr, &grad.biases);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn new_layer_has_zero_biases_and_expected_shapes() {
        let layer = Layer::new(3, 5, Initializer::He, &mut StdRng::seed_from_u64(1));
        assert_eq!(layer.weights.shape(), (3, 5));
        assert_eq!(layer.biases, Matrix::zeros(1, 5));
        assert_eq!((layer.input_size(), layer.size()), (3, 5));
    }

    #[test]
    fn linear_adds_bias_to_every_row() {
        let layer = Layer {
            weights: Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 2.0]]).unwrap(),
            biases: Matrix::from_rows(vec![vec![0.5, -0.5]]).unwrap(),
        };
        let x = Matrix::from_rows(vec![vec![1.0, 1.0], vec![2.0, 3.0]]).unwrap();
        let z = layer.linear(&x);
        assert_eq!(z.row(0), &[1.5, 1.5]);
        assert_eq!(z.row(1), &[2.5, 5.5]);
    }

    #[test]
    fn apply_gradients_steps_against_the_gradient() {
        let mut layer = Layer {
            weights: Matrix::from_rows(vec![vec![1.0]]).unwrap(),
            biases: Matrix::from_rows(vec![vec![0.0]]).unwrap(),
        };
        let grad = LayerGradient {
            weights: Matrix::from_rows(vec![vec![2.0]]).unwrap(),
            biases: Matrix::from_rows(vec![vec![-1.0]]).unwrap(),
        };
        layer.apply_gradients(&grad, 0.1);
        assert!((layer.weights.get(0, 0) - 0.8).abs() < 1e-12);
        assert!((layer.biases.get(0, 0) - 0.1).abs() < 1e-12);
    }
}
