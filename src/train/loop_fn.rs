use std::sync::atomic::Ordering;

use log::{info, warn};

use crate::data::sample_source::SampleSource;
use crate::error::TrainError;
use crate::network::network::Network;
use crate::train::pass_stats::{PassStats, TrainSummary};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_sample;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` on every sample `source` still holds, one at a time, in
/// the order they are read.
///
/// The topology header must already have been consumed (the caller needs it
/// to build `network`).
///
/// # Skipped samples
/// A sample whose input or target length disagrees with the network's
/// topology is logged and skipped; both of its lines are consumed.
///
/// # Early termination
/// The loop stops before the next sample if:
/// - `config.max_passes` samples have been trained,
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// A malformed source (bad label, unparsable number, truncated sample)
/// aborts the run.
pub fn train_from_source<S: SampleSource>(
    network: &mut Network,
    mut source: S,
    config: &TrainConfig,
) -> Result<TrainSummary, TrainError> {
    let topology = network.topology();
    let n_inputs = topology[0];
    let n_outputs = topology[topology.len() - 1];

    let mut passes = 0;
    let mut skipped = 0;

    while source.has_more() {
        if stop_requested(config) || config.max_passes.is_some_and(|max| passes >= max) {
            break;
        }

        let inputs = source.read_inputs()?;
        let targets = source.read_targets()?;

        if inputs.len() != n_inputs || targets.len() != n_outputs {
            skipped += 1;
            warn!(
                "skipping sample with {} inputs and {} targets (network expects {} and {})",
                inputs.len(),
                targets.len(),
                n_inputs,
                n_outputs
            );
            continue;
        }

        let outputs = train_sample(network, &inputs, &targets)?;
        passes += 1;
        let recent_avg_error = network.recent_average_error();

        if config.report_every > 0 && passes % config.report_every == 0 {
            info!("pass {passes}: recent average error {recent_avg_error:.6}");
        }

        if let Some(ref tx) = config.progress_tx {
            let stats = PassStats { pass: passes, inputs, outputs, targets, recent_avg_error };
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    let summary = TrainSummary {
        passes,
        skipped,
        recent_avg_error: network.recent_average_error(),
    };
    info!(
        "training done: {} passes, {} skipped, recent average error {:.6}",
        summary.passes, summary.skipped, summary.recent_avg_error
    );
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}
