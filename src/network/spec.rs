use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_EPOCHS: usize = 1000;
pub const DEFAULT_LOSS_SAMPLE_INTERVAL: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

fn default_loss_sample_interval() -> usize {
    DEFAULT_LOSS_SAMPLE_INTERVAL
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Hyperparameters of a network: its shape, how it is trained, and the seed
/// that fixes its initial weights.
///
/// Fields:
/// - `architecture`         — layer widths `[n0, …, nL]`; `n0` input features,
///                            `nL` output classes
/// - `learning_rate`        — gradient-descent step size, `> 0`
/// - `epochs`               — full-batch updates per `fit` call, `> 0`
/// - `activation`           — hidden-layer activation (`"sigmoid"`/`"relu"`)
/// - `loss_sample_interval` — record the loss every this many epochs
/// - `seed`                 — initializer seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub architecture: Vec<usize>,
    pub learning_rate: f64,
    pub epochs: usize,
    pub activation: ActivationFunction,
    #[serde(default = "default_loss_sample_interval")]
    pub loss_sample_interval: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl NetworkSpec {
    /// A spec with the default hyperparameters for `architecture`.
    pub fn new(architecture: Vec<usize>) -> NetworkSpec {
        NetworkSpec {
            architecture,
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
            activation: ActivationFunction::Sigmoid,
            loss_sample_interval: DEFAULT_LOSS_SAMPLE_INTERVAL,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_loss_sample_interval(mut self, interval: usize) -> Self {
        self.loss_sample_interval = interval;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn input_size(&self) -> usize {
        self.architecture.first().copied().unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.architecture.last().copied().unwrap_or(0)
    }

    /// Rejects any configuration that cannot describe a trainable network.
    pub fn validate(&self) -> Result<()> {
        if self.architecture.len() < 2 {
            return Err(NetworkError::config(format!(
                "architecture needs at least 2 layer widths, got {}",
                self.architecture.len()
            )));
        }
        if let Some(pos) = self.architecture.iter().position(|&w| w == 0) {
            return Err(NetworkError::config(format!("layer {pos} has zero width")));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::config(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(NetworkError::config("epochs must be at least 1"));
        }
        if self.loss_sample_interval == 0 {
            return Err(NetworkError::config("loss_sample_interval must be at least 1"));
        }
        Ok(())
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes and validates a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        spec.validate()?;
        Ok(spec)
    }
}
