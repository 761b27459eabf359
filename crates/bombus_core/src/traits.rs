use crate::error::Result;
use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in simulated quantities.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A per-step update rule over a fixed set of tracked variables.
///
/// Rules that model continuous laws fold `dt` into the increment
/// (`delta = rate * dt`); bookkeeping rules expressed as per-step
/// constants (the nectar balance) ignore `dt` and return the constants
/// directly. Either way, `out` must be computed from the pre-step
/// snapshot only.
pub trait StepRule<T: Scalar> {
    /// Returns the number of tracked variables.
    fn dimension(&self) -> usize;

    /// Writes the increment for one step into `out`.
    /// t: time at the start of the step
    /// dt: step size
    /// state: pre-step snapshot (read-only)
    fn delta(&self, t: T, dt: T, state: &[T], out: &mut [T]) -> Result<()>;
}

/// A trait for steppers that advance a rule's state forward one step.
pub trait Steppable<T: Scalar> {
    /// Performs one step of size dt.
    /// t: current time (updated after step)
    /// state: current state (updated after step)
    fn step(&mut self, rule: &impl StepRule<T>, t: &mut T, state: &mut [T], dt: T) -> Result<()>;
}
