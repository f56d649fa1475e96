use log::{debug, warn};
use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

/// Append-only record of periodically sampled training loss.
///
/// `losses[k]` was measured at cumulative epoch `epochs[k]`, counting every
/// epoch of every `fit` call on the owning model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LossHistory {
    losses: Vec<f64>,
    epochs: Vec<usize>,
}

impl LossHistory {
    pub fn new() -> LossHistory {
        LossHistory::default()
    }

    /// Whether the `epoch`-th epoch (0-based, within one fit) is a sampling point.
    pub fn is_sample_epoch(epoch: usize, interval: usize) -> bool {
        interval > 0 && epoch % interval == 0
    }

    pub fn record(&mut self, cumulative_epoch: usize, loss: f64) {
        if loss.is_finite() {
            debug!("epoch {cumulative_epoch}: loss = {loss:.6}");
        } else {
            warn!("epoch {cumulative_epoch}: loss is not finite ({loss})");
        }
        self.losses.push(loss);
        self.epochs.push(cumulative_epoch);
    }

    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    pub fn epochs(&self) -> &[usize] {
        &self.epochs
    }

    pub fn last(&self) -> Option<f64> {
        self.losses.last().copied()
    }

    /// Checks that every loss has a matching epoch, e.g. after deserializing.
    pub fn check_consistent(&self) -> Result<()> {
        if self.epochs.len() != self.losses.len() {
            return Err(NetworkError::ShapeMismatch {
                what: "loss history epochs",
                got: self.epochs.len(),
                expected: self.losses.len(),
            });
        }
        Ok(())
    }
}
