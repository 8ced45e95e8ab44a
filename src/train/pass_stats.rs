use serde::{Serialize, Deserialize};

/// Per-sample training record emitted by `train_from_source`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop
/// sends one `PassStats` value after every trained sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassStats {
    /// 1-based count of trained samples.
    pub pass: usize,
    pub inputs: Vec<f64>,
    /// Network outputs before this sample's weight update.
    pub outputs: Vec<f64>,
    pub targets: Vec<f64>,
    pub recent_avg_error: f64,
}

/// Outcome of a whole `train_from_source` run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainSummary {
    /// Samples the network was trained on.
    pub passes: usize,
    /// Samples dropped because a vector length disagreed with the topology.
    pub skipped: usize,
    pub recent_avg_error: f64,
}
