use serde::{Deserialize, Serialize};

use crate::activation::{transfer, transfer_derivative};
use crate::init::WeightSource;
use crate::network::connection::Connection;

/// One neuron of a layer.
///
/// `outgoing[k]` is the connection from this unit to unit `k` of the next
/// layer, so units of the previous layer are read through `self.index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    output_value: f64,
    gradient: f64,
    index: usize,
    outgoing: Vec<Connection>,
}

impl Unit {
    pub fn new(num_outputs: usize, index: usize, weights: &mut impl WeightSource) -> Unit {
        let outgoing = (0..num_outputs).map(|_| Connection::new(weights)).collect();
        Unit {
            output_value: 0.0,
            gradient: 0.0,
            index,
            outgoing,
        }
    }

    /// Weighted sum over the whole previous layer (its bias unit included),
    /// squashed through the transfer function.
    pub fn activate(&mut self, previous: &[Unit]) {
        let sum: f64 = previous
            .iter()
            .map(|p| p.output_value * p.outgoing[self.index].weight())
            .sum();
        self.output_value = transfer(sum);
    }

    pub fn compute_output_gradient(&mut self, target: f64) {
        let delta = target - self.output_value;
        self.gradient = delta * transfer_derivative(self.output_value);
    }

    pub fn compute_hidden_gradient(&mut self, next: &[Unit]) {
        self.gradient = self.sum_dow(next) * transfer_derivative(self.output_value);
    }

    /// Sum of this unit's contributions to the gradients of the units it
    /// feeds. The trailing bias unit of `next` has no gradient of its own.
    fn sum_dow(&self, next: &[Unit]) -> f64 {
        let targets = next.len().saturating_sub(1);
        next[..targets]
            .iter()
            .map(|n| self.outgoing[n.index].weight() * n.gradient)
            .sum()
    }

    /// Adjusts the connections pointing at this unit. They live in the
    /// previous layer, so this mutates `previous`, not `self`.
    pub fn apply_weight_updates(&self, previous: &mut [Unit], eta: f64, alpha: f64) {
        for p in previous.iter_mut() {
            let input = p.output_value;
            let conn = &mut p.outgoing[self.index];
            let new_delta = eta * input * self.gradient + alpha * conn.delta_weight();
            conn.set_weight(conn.weight() + new_delta);
            conn.set_delta_weight(new_delta);
        }
    }

    pub fn output_value(&self) -> f64 {
        self.output_value
    }

    pub fn set_output_value(&mut self, value: f64) {
        self.output_value = value;
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn outgoing(&self) -> &[Connection] {
        &self.outgoing
    }
}
