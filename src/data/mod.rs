pub mod memory;
pub mod sample_source;
pub mod training_data;

pub use memory::{random_xor, xor_table, MemorySource};
pub use sample_source::SampleSource;
pub use training_data::{write_samples, TextSampleSource};
