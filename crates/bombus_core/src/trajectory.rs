use crate::error::{Error, Result};
use crate::state::StateVector;
use serde::Serialize;

/// The ordered history of state snapshots produced by one run,
/// indexed by step number and by elapsed time.
///
/// Snapshots are stored row-major (`data[i * dim .. (i + 1) * dim]` is
/// snapshot `i`). A trajectory is never mutated after its run
/// completes; chaining a follow-up run through [`Trajectory::extend_with`]
/// builds the combined history before it is handed to a consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    names: Vec<String>,
    times: Vec<f64>,
    data: Vec<f64>,
}

impl Trajectory {
    pub(crate) fn with_capacity(names: Vec<String>, samples: usize) -> Self {
        let dim = names.len();
        Self {
            names,
            times: Vec::with_capacity(samples),
            data: Vec::with_capacity(samples * dim),
        }
    }

    pub(crate) fn push(&mut self, t: f64, state: &[f64]) {
        debug_assert_eq!(state.len(), self.names.len());
        self.times.push(t);
        self.data.extend_from_slice(state);
    }

    pub fn dimension(&self) -> usize {
        self.names.len()
    }

    /// Number of snapshots (`step_count + 1` for a completed run).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Snapshot at step `i`.
    pub fn state_at(&self, i: usize) -> Option<&[f64]> {
        if i >= self.len() {
            return None;
        }
        let dim = self.dimension();
        Some(&self.data[i * dim..(i + 1) * dim])
    }

    /// The snapshot whose stored time is closest to `t`, with ties
    /// broken toward the earlier step. No interpolation.
    pub fn nearest(&self, t: f64) -> Option<(f64, &[f64])> {
        let mut best: Option<usize> = None;
        for (i, &time) in self.times.iter().enumerate() {
            match best {
                Some(b) if (time - t).abs() >= (self.times[b] - t).abs() => {}
                _ => best = Some(i),
            }
        }
        best.map(|i| (self.times[i], self.state_at(i).unwrap()))
    }

    /// Copies one variable's series out of every snapshot, leaving the
    /// trajectory untouched.
    pub fn project(&self, variable: &str) -> Result<Vec<f64>> {
        let idx = self
            .names
            .iter()
            .position(|n| n == variable)
            .ok_or_else(|| {
                Error::Config(format!("trajectory tracks no variable named `{variable}`"))
            })?;
        let dim = self.dimension();
        Ok((0..self.len()).map(|i| self.data[i * dim + idx]).collect())
    }

    /// The last snapshot as a seed for a chained run.
    pub fn final_state(&self) -> Option<StateVector> {
        let last = self.len().checked_sub(1)?;
        Some(StateVector::from_parts(
            self.names.clone(),
            self.state_at(last)?.to_vec(),
        ))
    }

    /// Appends a chained run. The follow-up must track the same
    /// variables and must have been seeded from this trajectory's
    /// final snapshot; its duplicate seed row is dropped.
    pub fn extend_with(&mut self, other: Trajectory) -> Result<()> {
        if other.names != self.names {
            return Err(Error::Config(format!(
                "cannot chain trajectories over different variables: {:?} vs {:?}",
                self.names, other.names
            )));
        }
        if self.is_empty() || other.is_empty() {
            return Err(Error::Config(
                "cannot chain an empty trajectory".to_string(),
            ));
        }
        let last = self.len() - 1;
        if other.times[0] != self.times[last]
            || other.state_at(0) != self.state_at(last)
        {
            return Err(Error::Config(
                "chained run must start from the previous run's final snapshot".to_string(),
            ));
        }
        self.times.extend_from_slice(&other.times[1..]);
        self.data.extend_from_slice(&other.data[other.dimension()..]);
        Ok(())
    }
}
