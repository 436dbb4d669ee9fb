/// A callable model that maps a typed input to a typed output.
///
/// Models must be pure: the propagator calls them repeatedly with perturbed
/// copies of the nominal input and assumes every call is independent and
/// free of side effects.
///
/// Scalar models over measured variables use `Input = Vec<f64>` and
/// `Output = f64`, with inputs ordered the same way as the sigma vector that
/// accompanies them.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the model at `input`.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type to represent domain failures,
    /// such as a logarithm of a non-positive argument.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// The inputs of one model call together with the value it returned.
///
/// The propagator reports its nominal evaluation this way, so observers see
/// exactly which vector produced the result value.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Records a model call.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}
