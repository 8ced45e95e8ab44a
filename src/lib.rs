pub mod activation;
pub mod data;
pub mod error;
pub mod format;
pub mod init;
pub mod loss;
pub mod network;
pub mod train;

// Convenience re-exports
pub use data::{MemorySource, SampleSource, TextSampleSource};
pub use error::{NetError, Result, SampleError, TrainError};
pub use init::{ConstantWeights, UniformWeights, WeightSource};
pub use network::{Connection, NetConfig, Network, Unit};
pub use train::{train_epochs, train_from_source, train_sample, TrainConfig, TrainSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{MemorySource, SampleSource, TextSampleSource};
    pub use crate::error::{NetError, SampleError, TrainError};
    pub use crate::init::{ConstantWeights, UniformWeights, WeightSource};
    pub use crate::network::{NetConfig, Network};
    pub use crate::train::{train_epochs, train_from_source, train_sample, TrainConfig};
}
