use log::debug;
use rand::{rngs::StdRng, SeedableRng};

use crate::activation::activation::ActivationFunction;
use crate::layers::dense::Layer;

/// Weight-scaling scheme for a single layer transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initializer {
    /// He initialization: N(0, 1) · sqrt(2 / fan_in).
    ///
    /// Used for transitions that feed a ReLU. The variance 2/fan_in accounts
    /// for ReLU zeroing half of its inputs on average.
    He,
    /// Xavier (Glorot) initialization: N(0, 1) · sqrt(1 / fan_in).
    ///
    /// Used for sigmoid transitions and for the output transition, which
    /// always feeds softmax.
    Xavier,
}

impl Initializer {
    pub fn std_dev(&self, fan_in: usize) -> f64 {
        let gain = match self {
            Initializer::He => 2.0,
            Initializer::Xavier => 1.0,
        };
        (gain / fan_in as f64).sqrt()
    }

    /// Picks the scheme for transition `index` (0-based) out of `transitions`.
    pub fn for_transition(activation: ActivationFunction, index: usize, transitions: usize) -> Initializer {
        let is_output = index + 1 == transitions;
        match activation {
            ActivationFunction::ReLU if !is_output => Initializer::He,
            _ => Initializer::Xavier,
        }
    }
}

/// Seeds one RNG from `seed` and draws every layer from it, in order.
///
/// The RNG lives only for the duration of this call, so nothing else in the
/// process can perturb the draw sequence.
pub fn initialize_layers(architecture: &[usize], activation: ActivationFunction, seed: u64) -> Vec<Layer> {
    let mut rng = StdRng::seed_from_u64(seed);
    let transitions = architecture.len().saturating_sub(1);

    architecture
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let init = Initializer::for_transition(activation, i, transitions);
            debug!("layer {}: {} -> {} with {:?} init", i + 1, pair[0], pair[1], init);
            Layer::new(pair[0], pair[1], init, &mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_hidden_layers_use_he_but_output_uses_xavier() {
        let relu = ActivationFunction::ReLU;
        assert_eq!(Initializer::for_transition(relu, 0, 3), Initializer::He);
        assert_eq!(Initializer::for_transition(relu, 1, 3), Initializer::He);
        assert_eq!(Initializer::for_transition(relu, 2, 3), Initializer::Xavier);
    }

    #[test]
    fn sigmoid_always_uses_xavier() {
        for i in 0..3 {
            assert_eq!(
                Initializer::for_transition(ActivationFunction::Sigmoid, i, 3),
                Initializer::Xavier
            );
        }
    }

    #[test]
    fn scales_follow_fan_in() {
        assert!((Initializer::He.std_dev(8) - 0.5).abs() < 1e-12);
        assert!((Initializer::Xavier.std_dev(4) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn same_seed_gives_identical_layers() {
        let arch = [4, 8, 3];
        let a = initialize_layers(&arch, ActivationFunction::ReLU, 42);
        let b = initialize_layers(&arch, ActivationFunction::ReLU, 42);
        let c = initialize_layers(&arch, ActivationFunction::ReLU, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].weights.shape(), (4, 8));
        assert_eq!(a[1].biases.shape(), (1, 3));
    }

    #[test]
    fn empirical_spread_tracks_requested_scale() {
        let layers = initialize_layers(&[200, 200, 2], ActivationFunction::ReLU, 7);
        let w = &layers[0].weights;
        let n = (w.rows * w.cols) as f64;
        let var = w.data.iter().flatten().map(|x| x * x).sum::<f64>() / n;
        let expected = 2.0 / 200.0;
        assert!((var - expected).abs() < expected * 0.1, "variance {var}");
    }
}
