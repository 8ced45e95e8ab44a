pub mod trainer;
pub mod pass_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::{train_epochs, train_sample};
pub use pass_stats::{PassStats, TrainSummary};
pub use train_config::TrainConfig;
pub use loop_fn::train_from_source;
