/// Transfer function applied to every unit's weighted input sum.
///
/// tanh keeps outputs in `[-1, 1]`.
pub fn transfer(x: f64) -> f64 {
    x.tanh()
}

/// Slope of `transfer` expressed through its own output.
///
/// `output` must be a value `transfer` already produced: since
/// `output = tanh(x)`, `d/dx tanh(x) = 1 - output²` exactly.
/// Passing a pre-activation sum here gives a wrong slope.
pub fn transfer_derivative(output: f64) -> f64 {
    1.0 - output * output
}
