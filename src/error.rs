use thiserror::Error;

/// Result type used by every fallible entry point of the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors surfaced at the public boundary of a `Network`.
///
/// Numeric trouble (overflowing exponentials, `log(0)`) is never reported
/// here; it is absorbed by clamping inside the activation and loss code.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// The network configuration cannot describe a valid model.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An input's dimensions disagree with the architecture or with each other.
    /// A class index outside `[0, classes)` is reported as `"label index"`.
    #[error("shape mismatch for {what}: got {got}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// Training or scoring was asked to work on zero samples.
    #[error("input batch contains no samples")]
    EmptyInput,
}

impl NetworkError {
    pub(crate) fn config(msg: impl Into<String>) -> NetworkError {
        NetworkError::InvalidConfiguration(msg.into())
    }
}

impl From<NetworkError> for std::io::Error {
    fn from(err: NetworkError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, err)
    }
}
