use crate::error::Result;
use crate::network::network::Network;

/// One training step: forward pass, read the outputs, back-propagate.
///
/// Returns the outputs the network produced before its weights moved.
pub fn train_sample(network: &mut Network, inputs: &[f64], targets: &[f64]) -> Result<Vec<f64>> {
    network.forward(inputs)?;
    let outputs = network.results();
    network.backward(targets)?;
    Ok(outputs)
}

/// Trains on every pair in order, `epochs` times over, and returns the
/// recent average error afterwards.
pub fn train_epochs(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    epochs: usize,
) -> Result<f64> {
    for _ in 0..epochs {
        for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
            train_sample(network, input, expected)?;
        }
    }
    Ok(network.recent_average_error())
}
