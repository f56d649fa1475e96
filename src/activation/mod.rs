pub mod activation;

pub use activation::{relu, sigmoid, softmax, softmax_rows, ActivationFunction};
