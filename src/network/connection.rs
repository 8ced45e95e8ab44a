use serde::{Deserialize, Serialize};

use crate::init::WeightSource;

/// A directed weighted link to one unit of the next layer, plus the last
/// update applied to it (read back as momentum).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    weight: f64,
    delta_weight: f64,
}

impl Connection {
    /// Draws the initial weight from `weights`; the delta starts at zero.
    pub fn new(weights: &mut impl WeightSource) -> Connection {
        Connection::with_weight(weights.next_weight())
    }

    pub fn with_weight(weight: f64) -> Connection {
        Connection { weight, delta_weight: 0.0 }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn delta_weight(&self) -> f64 {
        self.delta_weight
    }

    pub fn set_delta_weight(&mut self, delta_weight: f64) {
        self.delta_weight = delta_weight;
    }
}
