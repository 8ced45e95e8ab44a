use rand::Rng;

use crate::data::sample_source::SampleSource;
use crate::error::SampleError;

/// Sample pairs held in memory, served in order.
#[derive(Debug, Clone)]
pub struct MemorySource {
    topology: Vec<usize>,
    inputs: Vec<Vec<f64>>,
    targets: Vec<Vec<f64>>,
    cursor: usize,
    // set between `read_inputs` and `read_targets` of one sample
    inputs_read: bool,
}

impl MemorySource {
    /// `inputs` and `targets` are paired by position; extra entries on the
    /// longer side are never served.
    pub fn new(topology: Vec<usize>, inputs: Vec<Vec<f64>>, targets: Vec<Vec<f64>>) -> Self {
        MemorySource { topology, inputs, targets, cursor: 0, inputs_read: false }
    }

    /// The four boolean XOR pairs on a `[2, 2, 1]` topology.
    pub fn xor() -> Self {
        let (inputs, targets) = xor_table();
        MemorySource::new(vec![2, 2, 1], inputs, targets)
    }

    pub fn len(&self) -> usize {
        self.inputs.len().min(self.targets.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    pub fn targets(&self) -> &[Vec<f64>] {
        &self.targets
    }

    /// Serves the samples again from the first one.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.inputs_read = false;
    }
}

impl SampleSource for MemorySource {
    fn has_more(&mut self) -> bool {
        self.cursor < self.len()
    }

    fn read_topology(&mut self) -> Result<Vec<usize>, SampleError> {
        Ok(self.topology.clone())
    }

    fn read_inputs(&mut self) -> Result<Vec<f64>, SampleError> {
        if self.cursor >= self.len() {
            return Err(SampleError::UnexpectedEof);
        }
        self.inputs_read = true;
        Ok(self.inputs[self.cursor].clone())
    }

    fn read_targets(&mut self) -> Result<Vec<f64>, SampleError> {
        if self.cursor >= self.len() {
            return Err(SampleError::UnexpectedEof);
        }
        let targets = self.targets[self.cursor].clone();
        if self.inputs_read {
            self.cursor += 1;
            self.inputs_read = false;
        }
        Ok(targets)
    }
}

/// All four XOR input combinations with their expected output.
pub fn xor_table() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    (inputs, targets)
}

/// `count` XOR samples with uniformly drawn input bits.
pub fn random_xor(count: usize, rng: &mut impl Rng) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    (0..count)
        .map(|_| {
            let a: bool = rng.gen();
            let b: bool = rng.gen();
            let bit = |v: bool| if v { 1.0 } else { 0.0 };
            (vec![bit(a), bit(b)], vec![bit(a ^ b)])
        })
        .unzip()
}
