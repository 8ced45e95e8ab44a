use serde::{Deserialize, Serialize};

/// Exponential moving average over roughly the last `smoothing_factor`
/// samples. Starts at zero.
///
/// The window is not stored here; the owner passes its configured value on
/// every update so there is only one copy of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentAverage {
    value: f64,
}

impl RecentAverage {
    pub fn new() -> RecentAverage {
        RecentAverage { value: 0.0 }
    }

    /// Folds one sample in and returns the new average.
    pub fn update(&mut self, sample: f64, smoothing_factor: f64) -> f64 {
        let s = smoothing_factor;
        self.value = (self.value * s + sample) / (s + 1.0);
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_update_is_damped_by_window() {
        let mut avg = RecentAverage::new();
        assert_abs_diff_eq!(avg.update(1.01, 100.0), 0.01, epsilon = 1e-12);
    }

    #[test]
    fn zero_smoothing_tracks_last_sample() {
        let mut avg = RecentAverage::new();
        avg.update(0.7, 0.0);
        assert_eq!(avg.update(0.2, 0.0), 0.2);
    }

    #[test]
    fn converges_to_constant_input() {
        let mut avg = RecentAverage::new();
        for _ in 0..2000 {
            avg.update(0.5, 10.0);
        }
        assert_abs_diff_eq!(avg.value(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn serializes_as_a_bare_number() {
        let mut avg = RecentAverage::new();
        avg.update(0.5, 0.0);
        assert_eq!(serde_json::to_string(&avg).unwrap(), "0.5");
    }
}
