use crate::traits::{Scalar, StepRule, Steppable};

/// Explicit (forward) Euler stepper.
///
/// The whole delta vector is computed from the pre-step snapshot and
/// applied at once, so no variable sees another variable's update
/// within the same step.
pub struct Euler<T: Scalar> {
    delta: Vec<T>,
}

impl<T: Scalar> Euler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            delta: vec![T::from_f64(0.0).unwrap(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Euler<T> {
    fn step(
        &mut self,
        rule: &impl StepRule<T>,
        t: &mut T,
        state: &mut [T],
        dt: T,
    ) -> crate::error::Result<()> {
        rule.delta(*t, dt, state, &mut self.delta)?;

        for i in 0..state.len() {
            state[i] = state[i] + self.delta[i];
        }

        *t = *t + dt;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Euler;
    use crate::error::Result;
    use crate::traits::{StepRule, Steppable};

    /// Each variable's delta reads the *other* variable, so any
    /// partial-update leakage within a step would show up immediately.
    struct Swap;

    impl StepRule<f64> for Swap {
        fn dimension(&self) -> usize {
            2
        }

        fn delta(&self, _t: f64, _dt: f64, state: &[f64], out: &mut [f64]) -> Result<()> {
            out[0] = state[1];
            out[1] = state[0];
            Ok(())
        }
    }

    #[test]
    fn deltas_come_from_the_pre_step_snapshot() {
        let mut stepper = Euler::new(2);
        let mut t = 0.0;
        let mut state = [1.0, 10.0];

        stepper
            .step(&Swap, &mut t, &mut state, 0.5)
            .expect("step should succeed");

        // 1 + 10 and 10 + 1, not 10 + 11.
        assert_eq!(state, [11.0, 11.0]);
        assert_eq!(t, 0.5);
    }
}
