use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// Training constants owned by a `Network`.
///
/// Fields:
/// - `eta`              — learning rate in `[0, 1]`: 0.0 learns nothing,
///                        0.2 is a medium learner, 1.0 is reckless
/// - `alpha`            — momentum, the multiplier of the last weight
///                        change: 0.0 is none, 0.5 is moderate
/// - `smoothing_factor` — number of samples the recent average error is
///                        smoothed over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    pub eta: f64,
    pub alpha: f64,
    pub smoothing_factor: f64,
}

impl Default for NetConfig {
    fn default() -> Self {
        NetConfig { eta: 0.15, alpha: 0.5, smoothing_factor: 100.0 }
    }
}

impl NetConfig {
    pub fn new(eta: f64, alpha: f64) -> Self {
        NetConfig { eta, alpha, ..NetConfig::default() }
    }

    pub fn with_smoothing_factor(mut self, smoothing_factor: f64) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.eta.is_finite() || !(0.0..=1.0).contains(&self.eta) {
            return Err(invalid(format!("eta must lie in [0, 1], got {}", self.eta)));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(invalid(format!("alpha must be finite and >= 0, got {}", self.alpha)));
        }
        if !self.smoothing_factor.is_finite() || self.smoothing_factor < 0.0 {
            return Err(invalid(format!(
                "smoothing_factor must be finite and >= 0, got {}",
                self.smoothing_factor
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads a config from JSON; absent fields keep their defaults.
    pub fn load_json(path: &str) -> Result<NetConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: NetConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

fn invalid(reason: String) -> NetError {
    NetError::InvalidConfig { reason }
}
