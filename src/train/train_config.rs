use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::pass_stats::PassStats;

/// Configuration for a `train_from_source` run.
///
/// # Fields
/// - `max_passes`   — stop after this many trained samples; `None` reads
///                    the source to the end
/// - `report_every` — log a progress line every N trained samples; `0`
///                    disables progress logging
/// - `progress_tx`  — optional channel sender; one `PassStats` is sent per
///                    trained sample.  If the receiver is dropped the loop
///                    terminates early.
/// - `stop_flag`    — optional atomic flag; when set to `true` from another
///                    thread the loop terminates before the next sample.
pub struct TrainConfig {
    pub max_passes: Option<usize>,
    pub report_every: usize,
    pub progress_tx: Option<mpsc::Sender<PassStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Reads the whole source, logging every `report_every` passes, with no
    /// progress channel and no stop flag.
    pub fn new(report_every: usize) -> Self {
        TrainConfig {
            max_passes: None,
            report_every,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(1000)
    }
}
