use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

use ferrite_mlp::Matrix;

/// Samples `per_class` points around each center with the given spread.
/// Classes are interleaved; the label of a point is its center's index.
pub fn gaussian_blobs(centers: &[Vec<f64>], per_class: usize, std_dev: f64, seed: u64) -> (Matrix, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, std_dev).unwrap();
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for _ in 0..per_class {
        for (label, center) in centers.iter().enumerate() {
            rows.push(center.iter().map(|c| c + noise.sample(&mut rng)).collect());
            labels.push(label);
        }
    }
    (Matrix::from_rows(rows).unwrap(), labels)
}

/// The two 2D clusters at (-2, -2) and (2, 2).
pub fn two_clusters(per_class: usize, std_dev: f64, seed: u64) -> (Matrix, Vec<usize>) {
    gaussian_blobs(&[vec![-2.0, -2.0], vec![2.0, 2.0]], per_class, std_dev, seed)
}
