use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::init::{UniformWeights, WeightSource};
use crate::loss::{RecentAverage, RmsError};
use crate::network::config::NetConfig;
use crate::network::unit::Unit;

/// Units of one layer; the last one is always the bias unit.
pub type Layer = Vec<Unit>;

/// A fully connected tanh network trained one sample at a time.
///
/// Every layer carries a trailing bias unit fixed at `1.0`. It feeds the
/// next layer like any other unit but never receives a connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    layers: Vec<Layer>,
    error: f64,
    recent_avg_error: RecentAverage,
    config: NetConfig,
}

impl Network {
    /// Builds one layer per topology entry, each with `topology[i]` units
    /// plus a bias unit. Connection weights are drawn from `weights` in
    /// layer order, unit order, then connection order.
    pub fn new(topology: &[usize], config: NetConfig, weights: &mut impl WeightSource) -> Result<Network> {
        check_topology(topology)?;
        config.validate()?;

        let layers: Vec<Layer> = topology
            .iter()
            .enumerate()
            .map(|(layer_num, &size)| {
                let num_outputs = topology.get(layer_num + 1).copied().unwrap_or(0);
                let mut layer: Layer = (0..=size)
                    .map(|index| Unit::new(num_outputs, index, weights))
                    .collect();
                if let Some(bias) = layer.last_mut() {
                    bias.set_output_value(1.0);
                }
                layer
            })
            .collect();

        debug!("built network with topology {:?} and {:?}", topology, config);

        Ok(Network {
            layers,
            error: 0.0,
            recent_avg_error: RecentAverage::new(),
            config,
        })
    }

    /// Network whose initial weights are reproducible from `seed`.
    pub fn seeded(topology: &[usize], config: NetConfig, seed: u64) -> Result<Network> {
        Network::new(topology, config, &mut UniformWeights::seeded(seed))
    }

    /// Network with weights drawn from the thread-local generator.
    pub fn random(topology: &[usize], config: NetConfig) -> Result<Network> {
        Network::new(topology, config, &mut UniformWeights::thread())
    }

    /// Latches `inputs` into the input layer and propagates them forward,
    /// one layer at a time.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<()> {
        let expected = self.layers[0].len() - 1;
        if inputs.len() != expected {
            return Err(NetError::DimensionMismatch { what: "inputs", expected, actual: inputs.len() });
        }

        for (unit, &value) in self.layers[0].iter_mut().zip(inputs) {
            unit.set_output_value(value);
        }

        for layer_num in 1..self.layers.len() {
            let (before, after) = self.layers.split_at_mut(layer_num);
            let previous = &before[layer_num - 1];
            let layer = &mut after[0];
            let targets = layer.len() - 1;
            for unit in &mut layer[..targets] {
                unit.activate(previous);
            }
        }
        Ok(())
    }

    /// Measures the error of the last forward pass against `targets`, then
    /// back-propagates gradients and adjusts every connection.
    pub fn backward(&mut self, targets: &[f64]) -> Result<()> {
        let expected = self.output_layer().len() - 1;
        if targets.len() != expected {
            return Err(NetError::DimensionMismatch { what: "targets", expected, actual: targets.len() });
        }

        self.error = RmsError::error(&self.results(), targets);
        self.recent_avg_error.update(self.error, self.config.smoothing_factor);

        let last = self.layers.len() - 1;
        for (unit, &target) in self.layers[last].iter_mut().zip(targets) {
            unit.compute_output_gradient(target);
        }

        // Hidden gradients, last hidden layer first: each one reads the
        // already final gradients of the layer after it.
        for layer_num in (1..last).rev() {
            let (before, after) = self.layers.split_at_mut(layer_num + 1);
            let next = &after[0];
            for unit in before[layer_num].iter_mut() {
                unit.compute_hidden_gradient(next);
            }
        }

        // Weight updates from the output layer down to the first hidden
        // layer. Connections into layer L live in layer L - 1.
        let (eta, alpha) = (self.config.eta, self.config.alpha);
        for layer_num in (1..=last).rev() {
            let (before, after) = self.layers.split_at_mut(layer_num);
            let previous = &mut before[layer_num - 1];
            let layer = &after[0];
            for unit in &layer[..layer.len() - 1] {
                unit.apply_weight_updates(previous, eta, alpha);
            }
        }
        Ok(())
    }

    /// Output values of the non-bias output units, in index order.
    pub fn results(&self) -> Vec<f64> {
        let output = self.output_layer();
        output[..output.len() - 1].iter().map(Unit::output_value).collect()
    }

    pub fn recent_average_error(&self) -> f64 {
        self.recent_avg_error.value()
    }

    /// RMS error of the most recent `backward` call.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Non-bias unit count of every layer, input layer first.
    pub fn topology(&self) -> Vec<usize> {
        self.layers.iter().map(|layer| layer.len() - 1).collect()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn config(&self) -> &NetConfig {
        &self.config
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    ///
    /// JSON has no NaN or infinity, so a diverged network is refused before
    /// the file is created.
    pub fn save_json(&self, path: &str) -> Result<()> {
        self.check_finite()?;
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network written by `save_json`, rejecting files whose
    /// layers break the connection layout or whose bias units are not `1.0`.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)?;
        network.check_layout()?;
        network.config.validate()?;
        Ok(network)
    }

    fn check_layout(&self) -> Result<()> {
        if self.layers.is_empty() || self.layers.iter().any(|layer| layer.len() < 2) {
            return Err(NetError::InvalidTopology {
                reason: "every layer needs at least one unit besides the bias unit".into(),
            });
        }
        let topology = self.topology();
        for (layer_num, layer) in self.layers.iter().enumerate() {
            let num_outputs = topology.get(layer_num + 1).copied().unwrap_or(0);
            for (index, unit) in layer.iter().enumerate() {
                if unit.index() != index || unit.outgoing().len() != num_outputs {
                    return Err(NetError::InvalidTopology {
                        reason: format!("unit {index} of layer {layer_num} does not match its layer layout"),
                    });
                }
            }
            let bias = &layer[layer.len() - 1];
            if bias.output_value() != 1.0 {
                return Err(NetError::InvalidTopology {
                    reason: format!("bias unit of layer {layer_num} outputs {} instead of 1", bias.output_value()),
                });
            }
        }
        Ok(())
    }

    fn check_finite(&self) -> Result<()> {
        let non_finite = |what: String| -> Result<()> { Err(NetError::NonFinite { what }) };
        if !self.error.is_finite() {
            return non_finite("error".into());
        }
        if !self.recent_avg_error.value().is_finite() {
            return non_finite("recent average error".into());
        }
        for (layer_num, layer) in self.layers.iter().enumerate() {
            for unit in layer {
                let at = format!("unit {} of layer {layer_num}", unit.index());
                if !unit.output_value().is_finite() {
                    return non_finite(format!("output of {at}"));
                }
                if !unit.gradient().is_finite() {
                    return non_finite(format!("gradient of {at}"));
                }
                for (k, conn) in unit.outgoing().iter().enumerate() {
                    if !conn.weight().is_finite() || !conn.delta_weight().is_finite() {
                        return non_finite(format!("connection {k} of {at}"));
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_topology(topology: &[usize]) -> Result<()> {
    if topology.is_empty() {
        return Err(NetError::InvalidTopology { reason: "topology has no layers".into() });
    }
    if let Some(layer_num) = topology.iter().position(|&size| size == 0) {
        return Err(NetError::InvalidTopology { reason: format!("layer {layer_num} has no units") });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{ConstantWeights, SequenceWeights};
    use approx::assert_abs_diff_eq;

    fn constant_net(topology: &[usize], w: f64) -> Network {
        Network::new(topology, NetConfig::default(), &mut ConstantWeights(w)).unwrap()
    }

    fn bias_outputs(net: &Network) -> Vec<f64> {
        net.layers().iter().map(|layer| layer.last().unwrap().output_value()).collect()
    }

    #[test]
    fn layers_get_an_extra_bias_unit() {
        let net = Network::seeded(&[2, 4, 2], NetConfig::default(), 1).unwrap();
        let sizes: Vec<usize> = net.layers().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 5, 3]);
        assert_eq!(bias_outputs(&net), vec![1.0, 1.0, 1.0]);
        assert_eq!(net.topology(), vec![2, 4, 2]);
    }

    #[test]
    fn connections_point_at_next_layer_non_bias_units() {
        let net = Network::seeded(&[3, 2, 4], NetConfig::default(), 9).unwrap();
        let expected = [2, 4, 0];
        for (layer, &n) in net.layers().iter().zip(expected.iter()) {
            for (index, unit) in layer.iter().enumerate() {
                assert_eq!(unit.index(), index);
                assert_eq!(unit.outgoing().len(), n);
            }
        }
    }

    #[test]
    fn rejects_empty_or_zero_topology() {
        for topology in [&[][..], &[2, 0, 1][..], &[0][..]] {
            let err = Network::seeded(topology, NetConfig::default(), 0).unwrap_err();
            assert!(matches!(err, NetError::InvalidTopology { .. }), "{topology:?}");
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let err = Network::seeded(&[2, 1], NetConfig::new(2.0, 0.5), 0).unwrap_err();
        assert!(matches!(err, NetError::InvalidConfig { .. }));
    }

    #[test]
    fn bias_alone_drives_zero_inputs() {
        let mut net = constant_net(&[2, 1], 0.5);
        net.forward(&[0.0, 0.0]).unwrap();
        assert_eq!(net.results(), vec![0.5f64.tanh()]);
    }

    #[test]
    fn single_layer_network_echoes_inputs() {
        let mut net = constant_net(&[3], 0.5);
        net.forward(&[0.1, -0.2, 0.3]).unwrap();
        assert_eq!(net.results(), vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn forward_keeps_bias_fixed_and_hides_it_from_results() {
        let mut net = Network::seeded(&[2, 4, 2], NetConfig::default(), 3).unwrap();
        net.forward(&[0.7, -0.3]).unwrap();
        assert_eq!(bias_outputs(&net), vec![1.0, 1.0, 1.0]);
        assert_eq!(net.results().len(), 2);

        net.backward(&[1.0, 0.0]).unwrap();
        net.forward(&[0.1, 0.9]).unwrap();
        assert_eq!(bias_outputs(&net), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn hand_computed_training_step() {
        // [1, 1, 1] with every weight 0.5, one sample (x = 1, t = 1).
        let config = NetConfig::new(0.15, 0.5);
        let mut net = Network::new(&[1, 1, 1], config, &mut ConstantWeights(0.5)).unwrap();
        net.forward(&[1.0]).unwrap();

        let h = (0.5f64 * 1.0 + 0.5 * 1.0).tanh();
        let o = (0.5 * h + 0.5).tanh();
        assert_abs_diff_eq!(net.results()[0], o, epsilon = 1e-12);

        net.backward(&[1.0]).unwrap();
        let g_out = (1.0 - o) * (1.0 - o * o);
        let g_hidden = 0.5 * g_out * (1.0 - h * h);
        assert_abs_diff_eq!(net.error(), 1.0 - o, epsilon = 1e-12);
        assert_abs_diff_eq!(net.layers()[2][0].gradient(), g_out, epsilon = 1e-12);
        assert_abs_diff_eq!(net.layers()[1][0].gradient(), g_hidden, epsilon = 1e-12);

        // hidden -> output uses the hidden output; bias -> output uses 1.0
        let hidden_to_out = &net.layers()[1][0].outgoing()[0];
        assert_abs_diff_eq!(hidden_to_out.weight(), 0.5 + 0.15 * h * g_out, epsilon = 1e-12);
        let bias_to_out = &net.layers()[1][1].outgoing()[0];
        assert_abs_diff_eq!(bias_to_out.weight(), 0.5 + 0.15 * g_out, epsilon = 1e-12);
        // input -> hidden
        let input_to_hidden = &net.layers()[0][0].outgoing()[0];
        assert_abs_diff_eq!(input_to_hidden.weight(), 0.5 + 0.15 * g_hidden, epsilon = 1e-12);
        assert_abs_diff_eq!(input_to_hidden.delta_weight(), 0.15 * g_hidden, epsilon = 1e-12);
    }

    #[test]
    fn hidden_gradient_reads_pre_update_weights() {
        // Updating the hidden -> output weights before computing the hidden
        // gradient would change it; compare against the untouched value.
        let mut net = constant_net(&[1, 1, 1], 0.5);
        net.forward(&[1.0]).unwrap();
        let out = net.results()[0];
        let h = net.layers()[1][0].output_value();
        net.backward(&[-1.0]).unwrap();

        let g_out = (-1.0 - out) * (1.0 - out * out);
        assert_abs_diff_eq!(net.layers()[1][0].gradient(), 0.5 * g_out * (1.0 - h * h), epsilon = 1e-12);
    }

    #[test]
    fn backward_is_deterministic() {
        let make = || {
            let mut weights = SequenceWeights::new(vec![0.1, 0.9, 0.4, 0.6, 0.3]);
            let mut net = Network::new(&[2, 3, 1], NetConfig::default(), &mut weights).unwrap();
            net.forward(&[1.0, 0.0]).unwrap();
            net
        };
        let mut a = make();
        let mut b = make();
        a.backward(&[1.0]).unwrap();
        b.backward(&[1.0]).unwrap();

        for (la, lb) in a.layers().iter().zip(b.layers()) {
            for (ua, ub) in la.iter().zip(lb) {
                assert_eq!(ua.gradient(), ub.gradient());
                assert_eq!(ua.outgoing(), ub.outgoing());
            }
        }
        assert_eq!(a.recent_average_error(), b.recent_average_error());
    }

    #[test]
    fn error_is_zero_when_outputs_match_targets() {
        let mut net = constant_net(&[2, 1], 0.5);
        net.forward(&[0.0, 0.0]).unwrap();
        net.backward(&[0.5f64.tanh()]).unwrap();
        assert_eq!(net.error(), 0.0);
        assert_eq!(net.recent_average_error(), 0.0);
    }

    #[test]
    fn recent_average_follows_smoothing_factor() {
        let config = NetConfig::default().with_smoothing_factor(1.0);
        let mut net = Network::new(&[1, 1], config, &mut ConstantWeights(0.0)).unwrap();
        net.forward(&[0.0]).unwrap();
        // output is tanh(0) = 0, so the error equals |target|
        net.backward(&[0.8]).unwrap();
        assert_abs_diff_eq!(net.error(), 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(net.recent_average_error(), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn mismatched_inputs_leave_state_untouched() {
        let mut net = Network::seeded(&[2, 3, 1], NetConfig::default(), 5).unwrap();
        let mut twin = net.clone();

        let err = net.forward(&[1.0, 0.0, 1.0]).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { expected: 2, actual: 3, .. }));

        net.forward(&[0.3, 0.6]).unwrap();
        twin.forward(&[0.3, 0.6]).unwrap();
        assert_eq!(net.results(), twin.results());
    }

    #[test]
    fn mismatched_targets_leave_state_untouched() {
        let mut net = Network::seeded(&[2, 3, 1], NetConfig::default(), 5).unwrap();
        net.forward(&[1.0, 1.0]).unwrap();
        let twin = net.clone();

        let err = net.backward(&[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { expected: 1, actual: 2, .. }));
        assert_eq!(net.recent_average_error(), twin.recent_average_error());
        for (la, lb) in net.layers().iter().zip(twin.layers()) {
            for (ua, ub) in la.iter().zip(lb) {
                assert_eq!(ua.outgoing(), ub.outgoing());
            }
        }
    }

    #[test]
    fn json_round_trip_preserves_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let path = path.to_str().unwrap();

        let mut net = Network::seeded(&[2, 2, 1], NetConfig::default(), 11).unwrap();
        net.forward(&[1.0, 0.0]).unwrap();
        net.backward(&[1.0]).unwrap();
        net.save_json(path).unwrap();

        let mut loaded = Network::load_json(path).unwrap();
        net.forward(&[0.0, 1.0]).unwrap();
        loaded.forward(&[0.0, 1.0]).unwrap();
        for (a, b) in net.results().iter().zip(loaded.results()) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(loaded.recent_average_error(), net.recent_average_error(), epsilon = 1e-12);
    }

    fn edit_saved(path: &str, edit: impl FnOnce(&mut serde_json::Value)) {
        let mut value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        edit(&mut value);
        std::fs::write(path, serde_json::to_string(&value).unwrap()).unwrap();
    }

    #[test]
    fn load_rejects_a_moved_bias_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let path = path.to_str().unwrap();

        constant_net(&[1, 1], 0.5).save_json(path).unwrap();
        edit_saved(path, |v| v["layers"][0][1]["output_value"] = 0.25.into());

        let err = Network::load_json(path).unwrap_err();
        assert!(matches!(err, NetError::InvalidTopology { .. }), "{err:?}");
    }

    #[test]
    fn smoothing_window_comes_from_the_config_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let path = path.to_str().unwrap();

        constant_net(&[1, 1], 0.5).save_json(path).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(saved["recent_avg_error"].is_number());

        edit_saved(path, |v| v["config"]["smoothing_factor"] = (-1.0).into());
        let err = Network::load_json(path).unwrap_err();
        assert!(matches!(err, NetError::InvalidConfig { .. }), "{err:?}");
    }

    #[test]
    fn loaded_network_keeps_bias_driven_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let path = path.to_str().unwrap();

        constant_net(&[1, 1], 0.5).save_json(path).unwrap();
        let mut loaded = Network::load_json(path).unwrap();
        loaded.forward(&[0.0]).unwrap();
        assert_eq!(loaded.results(), vec![0.5f64.tanh()]);
        loaded.backward(&[0.0]).unwrap();
        assert!(loaded.recent_average_error().is_finite());
    }

    #[test]
    fn save_refuses_a_diverged_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");

        let mut net = constant_net(&[1, 1], 0.5);
        net.forward(&[f64::NAN]).unwrap();
        net.backward(&[0.0]).unwrap();
        assert!(net.error().is_nan());

        let err = net.save_json(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, NetError::NonFinite { .. }), "{err:?}");
        assert!(!path.exists());
    }
}
