pub mod rms;
pub mod recent_average;

pub use rms::RmsError;
pub use recent_average::RecentAverage;
