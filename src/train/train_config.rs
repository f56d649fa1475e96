use crate::activation::activation::ActivationFunction;
use crate::network::spec::NetworkSpec;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`               — full-batch updates to run; the loop never stops early
/// - `activation`           — hidden-layer activation used by forward and backward
/// - `loss_sample_interval` — loss is recorded on epochs `0, n, 2n, …` of the run
/// - `first_epoch`          — cumulative epoch count before this run, so samples
///                            from resumed runs line up on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub activation: ActivationFunction,
    pub loss_sample_interval: usize,
    pub first_epoch: usize,
}

impl TrainConfig {
    /// Builds the loop configuration for one `fit` call on a network.
    pub fn from_spec(spec: &NetworkSpec, first_epoch: usize) -> Self {
        TrainConfig {
            epochs: spec.epochs,
            activation: spec.activation,
            loss_sample_interval: spec.loss_sample_interval,
            first_epoch,
        }
    }
}
