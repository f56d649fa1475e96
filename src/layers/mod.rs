pub mod dense;
pub mod init;

pub use dense::{Layer, LayerGradient};
pub use init::{initialize_layers, Initializer};
