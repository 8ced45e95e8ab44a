pub struct RmsError;

impl RmsError {
    /// Root-mean-square error: sqrt(mean((target - output)²))
    pub fn error(outputs: &[f64], targets: &[f64]) -> f64 {
        let n = outputs.len() as f64;
        let sum_sq = outputs.iter().zip(targets.iter())
            .map(|(o, t)| (t - o).powi(2))
            .sum::<f64>();
        (sum_sq / n).sqrt()
    }
}
