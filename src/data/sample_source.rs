use crate::error::SampleError;

/// A stream of training samples preceded by the network topology.
///
/// Callers read the topology once, then alternate `read_inputs` and
/// `read_targets` while `has_more` is true.
pub trait SampleSource {
    fn has_more(&mut self) -> bool;

    fn read_topology(&mut self) -> Result<Vec<usize>, SampleError>;

    fn read_inputs(&mut self) -> Result<Vec<f64>, SampleError>;

    fn read_targets(&mut self) -> Result<Vec<f64>, SampleError>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn has_more(&mut self) -> bool {
        (**self).has_more()
    }

    fn read_topology(&mut self) -> Result<Vec<usize>, SampleError> {
        (**self).read_topology()
    }

    fn read_inputs(&mut self) -> Result<Vec<f64>, SampleError> {
        (**self).read_inputs()
    }

    fn read_targets(&mut self) -> Result<Vec<f64>, SampleError> {
        (**self).read_targets()
    }
}
