use thiserror::Error;

/// Errors raised by the network itself.
///
/// Every variant is detected before the offending call mutates any state.
#[derive(Error, Debug)]
pub enum NetError {
    #[error("invalid topology: {reason}")]
    InvalidTopology { reason: String },

    #[error("dimension mismatch for {what}: expected {expected} values, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("cannot save network: {what} is not finite")]
    NonFinite { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while reading training samples.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected a `Topology:` header")]
    MissingTopology { line: usize },

    #[error("line {line}: expected label `{expected}`, found `{found}`")]
    UnexpectedLabel {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: cannot parse `{token}` as a number")]
    ParseValue { line: usize, token: String },

    #[error("unexpected end of sample data")]
    UnexpectedEof,
}

/// Errors that stop a training run.
#[derive(Error, Debug)]
pub enum TrainError {
    #[error(transparent)]
    Net(#[from] NetError),

    #[error(transparent)]
    Sample(#[from] SampleError),
}

pub type Result<T> = std::result::Result<T, NetError>;
