pub mod backward;
pub mod forward;
pub mod labels;
pub mod network;
pub mod parameters;
pub mod spec;

pub use labels::Labels;
pub use network::{ModelState, Network};
pub use parameters::ParameterStore;
pub use spec::NetworkSpec;
