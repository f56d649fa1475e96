use crate::math::matrix::Matrix;

/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Probabilities are clipped to `[EPS, 1 - EPS]` before `ln` to keep `log(0)` out.
pub const EPS: f64 = 1e-15;

impl CrossEntropyLoss {
    /// Mean loss over the batch:
    ///   L = -mean_rows(sum_classes(expected * ln(clip(predicted, EPS, 1 - EPS))))
    ///
    /// `predicted` — softmax probabilities, one row per sample
    /// `expected`  — one-hot targets, same shape
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        assert_eq!(predicted.shape(), expected.shape(), "prediction and target shapes differ");
        if predicted.rows == 0 {
            return 0.0;
        }
        let total: f64 = predicted.data.iter().zip(expected.data.iter())
            .map(|(p_row, e_row)| {
                p_row.iter().zip(e_row.iter())
                    .map(|(p, e)| e * p.clamp(EPS, 1.0 - EPS).ln())
                    .sum::<f64>()
            })
            .sum();
        -total / predicted.rows as f64
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the pre-softmax
    /// logits, per sample:
    ///   dL/dz = predicted - expected
    ///
    /// This is the output-layer delta of the backward pass; the softmax
    /// Jacobian is never built.
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Matrix {
        predicted - expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_prediction_costs_almost_nothing() {
        let y = Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert!(CrossEntropyLoss::loss(&y, &y) < 1e-12);
    }

    #[test]
    fn zero_probability_is_clipped_not_infinite() {
        let p = Matrix::from_rows(vec![vec![1.0, 0.0]]).unwrap();
        let y = Matrix::from_rows(vec![vec![0.0, 1.0]]).unwrap();
        let loss = CrossEntropyLoss::loss(&p, &y);
        assert!(loss.is_finite());
        assert!((loss - (-EPS.ln())).abs() < 1e-9);
    }

    #[test]
    fn loss_is_mean_over_rows() {
        let p = Matrix::from_rows(vec![vec![0.5, 0.5], vec![0.25, 0.75]]).unwrap();
        let y = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let expected = -(0.5f64.ln() + 0.75f64.ln()) / 2.0;
        assert!((CrossEntropyLoss::loss(&p, &y) - expected).abs() < 1e-12);
    }

    #[test]
    fn derivative_is_prediction_minus_target() {
        let p = Matrix::from_rows(vec![vec![0.2, 0.8]]).unwrap();
        let y = Matrix::from_rows(vec![vec![0.0, 1.0]]).unwrap();
        let d = CrossEntropyLoss::derivative(&p, &y);
        assert!((d.get(0, 0) - 0.2).abs() < 1e-12);
        assert!((d.get(0, 1) + 0.2).abs() < 1e-12);
    }
}
