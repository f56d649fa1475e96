pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Labels, ModelState, Network, NetworkSpec, ParameterStore};
pub use loss::history::LossHistory;
pub use optim::gradient_descent::GradientDescent;
pub use train::loop_fn::train_loop;
