use log::info;
use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::loss::history::LossHistory;
use crate::math::matrix::Matrix;
use crate::network::forward::forward;
use crate::network::labels::Labels;
use crate::network::parameters::ParameterStore;
use crate::network::spec::NetworkSpec;
use crate::optim::gradient_descent::GradientDescent;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// Lifecycle of a `Network`. Inference is valid in both states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelState {
    /// Parameters are freshly seeded.
    Initialized,
    /// At least one `fit` has run; further fits resume from here.
    Trained,
}

/// A multi-layer perceptron classifier with a softmax output layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    spec: NetworkSpec,
    params: ParameterStore,
    history: LossHistory,
    state: ModelState,
    epochs_trained: usize,
}

impl Network {
    /// Validates `spec` and seeds the parameters from `spec.seed`.
    pub fn new(spec: NetworkSpec) -> Result<Network> {
        spec.validate()?;
        let params = ParameterStore::initialize(&spec.architecture, spec.activation, spec.seed);
        Ok(Network {
            spec,
            params,
            history: LossHistory::new(),
            state: ModelState::Initialized,
            epochs_trained: 0,
        })
    }

    /// Runs `spec.epochs` full-batch gradient-descent epochs on `(x, y)`.
    ///
    /// `y` is either class indices or a one-hot matrix. Everything is validated
    /// before the first epoch, so an `Err` leaves the model untouched. Calling
    /// `fit` again continues from the current parameters.
    pub fn fit<'a>(&mut self, x: &Matrix, y: impl Into<Labels<'a>>) -> Result<()> {
        let labels = y.into();
        self.check_input(x)?;
        if x.rows == 0 {
            return Err(NetworkError::EmptyInput);
        }
        self.check_label_count(x, &labels)?;
        let targets = labels.to_one_hot(self.spec.output_size())?;

        info!(
            "fitting {:?} ({}) on {} samples for {} epochs, lr = {}",
            self.spec.architecture, self.spec.activation, x.rows, self.spec.epochs, self.spec.learning_rate
        );

        let optimizer = GradientDescent::new(self.spec.learning_rate);
        let config = TrainConfig::from_spec(&self.spec, self.epochs_trained);
        let last = train_loop(&mut self.params, x, &targets, &optimizer, &config, &mut self.history);

        self.epochs_trained += self.spec.epochs;
        self.state = ModelState::Trained;

        match last {
            Some(loss) => info!("fit finished after {} total epochs, last sampled loss = {loss:.6}", self.epochs_trained),
            None => info!("fit finished after {} total epochs", self.epochs_trained),
        }
        Ok(())
    }

    /// Per-class probabilities, one row per sample; every row sums to 1.
    pub fn predict_proba(&self, x: &Matrix) -> Result<Matrix> {
        self.check_input(x)?;
        Ok(forward(&self.params, self.spec.activation, x).into_output())
    }

    /// Most probable class per sample, always in `[0, classes)`.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        Ok(self.predict_proba(x)?.argmax_rows())
    }

    /// Fraction of samples whose predicted class equals the label.
    pub fn score<'a>(&self, x: &Matrix, y: impl Into<Labels<'a>>) -> Result<f64> {
        let labels = y.into();
        self.check_input(x)?;
        if x.rows == 0 {
            return Err(NetworkError::EmptyInput);
        }
        self.check_label_count(x, &labels)?;
        labels.validate(self.spec.output_size())?;

        let predicted = self.predict(x)?;
        let correct = predicted.iter()
            .zip(labels.class_indices())
            .filter(|(p, t)| **p == *t)
            .count();
        Ok(correct as f64 / x.rows as f64)
    }

    /// Sampled training losses, oldest first.
    pub fn loss_history(&self) -> &[f64] {
        self.history.losses()
    }

    /// Cumulative epoch at which each `loss_history` entry was sampled.
    pub fn loss_history_epochs(&self) -> &[usize] {
        self.history.epochs()
    }

    pub fn spec(&self) -> &NetworkSpec {
        &self.spec
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.params
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    pub fn epochs_trained(&self) -> usize {
        self.epochs_trained
    }

    fn check_input(&self, x: &Matrix) -> Result<()> {
        let expected = self.spec.input_size();
        if x.cols != expected {
            return Err(NetworkError::ShapeMismatch { what: "input features", got: x.cols, expected });
        }
        x.check_layout()
    }

    fn check_label_count(&self, x: &Matrix, labels: &Labels<'_>) -> Result<()> {
        if labels.len() != x.rows {
            return Err(NetworkError::ShapeMismatch { what: "label count", got: labels.len(), expected: x.rows });
        }
        Ok(())
    }

    /// Serializes the network (spec, weights, loss history) to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    ///
    /// The `NetworkSpec`, the parameter shapes and the loss history are
    /// re-validated; a mismatch is an `InvalidData` error.
    pub fn load_json(path: &str) -> std::io::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        network.spec.validate()?;
        network.params.check_shapes(&network.spec.architecture)?;
        network.history.check_consistent()?;
        Ok(network)
    }
}
