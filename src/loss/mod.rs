pub mod cross_entropy;
pub mod history;

pub use cross_entropy::CrossEntropyLoss;
pub use history::LossHistory;
