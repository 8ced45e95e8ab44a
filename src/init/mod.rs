pub mod weight_source;

pub use weight_source::{ConstantWeights, SequenceWeights, UniformWeights, WeightSource};
