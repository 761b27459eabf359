use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Discretization of the time axis into equal steps.
///
/// A grid over `[start, stop]` with `step_count` steps yields
/// `step_count + 1` sample times `start + i * dt`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeGrid {
    start: f64,
    stop: f64,
    step_count: usize,
}

impl TimeGrid {
    pub fn new(start: f64, stop: f64, step_count: usize) -> Result<Self> {
        if !start.is_finite() || !stop.is_finite() {
            return Err(Error::Config(format!(
                "time grid bounds must be finite, got [{start}, {stop}]"
            )));
        }
        if step_count < 1 {
            return Err(Error::Config(
                "time grid must have at least one step".to_string(),
            ));
        }
        if stop <= start {
            return Err(Error::Config(format!(
                "time grid requires stop > start, got [{start}, {stop}]"
            )));
        }
        Ok(Self {
            start,
            stop,
            step_count,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn dt(&self) -> f64 {
        (self.stop - self.start) / self.step_count as f64
    }

    /// Time value at sample `i`, computed as `start + i * dt` rather
    /// than by repeated addition, so sample times do not drift.
    pub fn time_at(&self, i: usize) -> f64 {
        self.start + i as f64 * self.dt()
    }

    /// Number of samples a run over this grid produces (`step_count + 1`).
    pub fn sample_count(&self) -> usize {
        self.step_count + 1
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.sample_count()).map(|i| self.time_at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::TimeGrid;
    use crate::test_util::assert_err_contains;

    #[test]
    fn dt_and_sample_times() {
        let grid = TimeGrid::new(0.0, 10.0, 1000).expect("grid should build");
        assert_eq!(grid.dt(), 0.01);
        assert_eq!(grid.sample_count(), 1001);
        assert_eq!(grid.time_at(0), 0.0);
        assert_eq!(grid.time_at(1000), 10.0);
        assert_eq!(grid.times().count(), 1001);
    }

    #[test]
    fn rejects_zero_steps() {
        assert_err_contains(TimeGrid::new(0.0, 1.0, 0), "at least one step");
    }

    #[test]
    fn rejects_non_positive_span() {
        assert_err_contains(TimeGrid::new(1.0, 1.0, 10), "stop > start");
        assert_err_contains(TimeGrid::new(2.0, 1.0, 10), "stop > start");
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert_err_contains(TimeGrid::new(0.0, f64::INFINITY, 10), "finite");
        assert_err_contains(TimeGrid::new(f64::NAN, 1.0, 10), "finite");
    }
}
