use log::trace;

use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::loss::history::LossHistory;
use crate::math::matrix::Matrix;
use crate::network::backward::backward;
use crate::network::forward::forward;
use crate::network::parameters::ParameterStore;
use crate::optim::gradient_descent::GradientDescent;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `params` for `config.epochs` full-batch epochs and returns the last
/// loss sampled during this run.
///
/// # Arguments
/// - `params`    — the parameters; modified in place, once per epoch
/// - `inputs`    — the whole training set, one row per sample
/// - `targets`   — one-hot labels, one row per sample
/// - `optimizer` — gradient descent (carries learning rate)
/// - `config`    — epochs, activation, sampling interval
/// - `history`   — receives a loss sample every `loss_sample_interval` epochs
///
/// The sampled loss is that of the epoch's forward output, i.e. measured
/// before the epoch's update is applied.
///
/// Callers validate shapes beforehand; `inputs` must be non-empty.
pub fn train_loop(
    params: &mut ParameterStore,
    inputs: &Matrix,
    targets: &Matrix,
    optimizer: &GradientDescent,
    config: &TrainConfig,
    history: &mut LossHistory,
) -> Option<f64> {
    debug_assert!(inputs.rows > 0, "train_loop needs at least one sample");
    debug_assert_eq!(inputs.rows, targets.rows);

    let mut last_sampled = None;

    for epoch in 0..config.epochs {
        let cache = forward(params, config.activation, inputs);
        let grads = backward(params, config.activation, &cache, targets);
        optimizer.step(params, &grads);

        if LossHistory::is_sample_epoch(epoch, config.loss_sample_interval) {
            let loss = CrossEntropyLoss::loss(cache.output(), targets);
            history.record(config.first_epoch + epoch, loss);
            last_sampled = Some(loss);
        }
        trace!("epoch {}/{} done", epoch + 1, config.epochs);
    }

    last_sampled
}
