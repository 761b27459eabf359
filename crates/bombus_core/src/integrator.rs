use crate::error::{Error, Result};
use crate::grid::TimeGrid;
use crate::solvers::Euler;
use crate::state::StateVector;
use crate::traits::{StepRule, Steppable};
use crate::trajectory::Trajectory;

/// Runs `rule` over `grid` starting from `seed`, producing a
/// trajectory of `step_count + 1` snapshots (the seed included).
///
/// Configuration is validated before any state mutation. After every
/// step each tracked variable is checked finite; the first non-finite
/// value aborts the run with the offending step index and variable
/// name. The model is fully deterministic: identical inputs always
/// yield identical trajectories.
pub fn run(rule: &impl StepRule<f64>, grid: &TimeGrid, seed: &StateVector) -> Result<Trajectory> {
    let dim = rule.dimension();
    if dim == 0 {
        return Err(Error::Config(
            "step rule must track at least one variable".to_string(),
        ));
    }
    if seed.len() != dim {
        return Err(Error::Config(format!(
            "seed dimension mismatch: rule tracks {dim} variables, seed has {}",
            seed.len()
        )));
    }
    for (name, value) in seed.names().iter().zip(seed.values()) {
        if !value.is_finite() {
            return Err(Error::Config(format!(
                "seed value for `{name}` must be finite, got {value}"
            )));
        }
    }

    let dt = grid.dt();
    let mut state = seed.values().to_vec();
    let mut stepper = Euler::new(dim);
    let mut trajectory = Trajectory::with_capacity(seed.names().to_vec(), grid.sample_count());
    trajectory.push(grid.start(), &state);

    for step in 1..=grid.step_count() {
        // Recorded times come from the grid, not from accumulated
        // addition, so snapshot i sits at exactly start + i * dt.
        let mut t = grid.time_at(step - 1);
        stepper.step(rule, &mut t, &mut state, dt)?;

        for (i, value) in state.iter().enumerate() {
            if !value.is_finite() {
                return Err(Error::NumericOverflow {
                    step,
                    variable: seed.names()[i].clone(),
                });
            }
        }
        trajectory.push(grid.time_at(step), &state);
    }

    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::error::Error;
    use crate::grid::TimeGrid;
    use crate::rules::{BalanceRule, GrowthLaw};
    use crate::state::StateVector;
    use crate::test_util::assert_err_contains;

    #[test]
    fn identical_inputs_yield_identical_trajectories() {
        let rule = BalanceRule::growth();
        let grid = TimeGrid::new(0.0, 10.0, 1000).expect("grid");
        let seed = StateVector::new(&[("nectar", 6.0), ("workers", 5.0), ("totalBees", 10.0)])
            .expect("seed");
        let first = run(&rule, &grid, &seed).expect("run");
        let second = run(&rule, &grid, &seed).expect("run");
        assert_eq!(first, second);
    }

    #[test]
    fn produces_step_count_plus_one_snapshots_on_grid_times() {
        let rule = GrowthLaw::exponential(0.04).expect("law");
        let grid = TimeGrid::new(0.0, 12.0, 1200).expect("grid");
        let seed = StateVector::scalar("population", 50.0);
        let trajectory = run(&rule, &grid, &seed).expect("run");

        assert_eq!(trajectory.len(), 1201);
        assert_eq!(trajectory.state_at(0).unwrap(), seed.values());
        let dt = grid.dt();
        for (i, &t) in trajectory.times().iter().enumerate() {
            assert_eq!(t, i as f64 * dt);
        }
    }

    #[test]
    fn exponential_growth_tracks_the_closed_form() {
        let rule = GrowthLaw::exponential(0.04).expect("law");
        let grid = TimeGrid::new(0.0, 12.0, 1200).expect("grid");
        let seed = StateVector::scalar("population", 50.0);
        let trajectory = run(&rule, &grid, &seed).expect("run");

        let numeric = trajectory.state_at(1200).unwrap()[0];
        let exact = 50.0 * (0.04_f64 * 12.0).exp();
        assert!(
            (numeric - exact).abs() / exact < 0.01,
            "expected {exact} within 1%, got {numeric}"
        );
    }

    #[test]
    fn logistic_growth_saturates_below_capacity() {
        let capacity = 1.0e12;
        let rule = GrowthLaw::logistic(0.04, capacity).expect("law");
        let grid = TimeGrid::new(0.0, 800.0, 80_000).expect("grid");
        let seed = StateVector::scalar("population", 50.0);
        let trajectory = run(&rule, &grid, &seed).expect("run");

        let series = trajectory.project("population").expect("projection");
        for pair in series.windows(2) {
            assert!(pair[1] >= pair[0], "trajectory must be monotone");
        }
        let last = *series.last().unwrap();
        assert!(last <= capacity * (1.0 + 1e-12));
        assert!(last > 0.99 * capacity, "run long enough to saturate");
    }

    #[test]
    fn nectar_balance_matches_the_independent_sum() {
        let rule = BalanceRule::growth();
        let grid = TimeGrid::new(0.0, 10.0, 1000).expect("grid");
        let seed = StateVector::new(&[("nectar", 6.0), ("workers", 5.0), ("totalBees", 10.0)])
            .expect("seed");
        let trajectory = run(&rule, &grid, &seed).expect("run");

        // Closed-form sum over pre-step values, accumulated the same
        // way the integrator applies deltas.
        let mut nectar = 6.0;
        let mut workers = 5.0;
        let mut total_bees = 10.0;
        for _ in 0..1000 {
            nectar += -0.005 * total_bees + 0.01 * workers;
            workers += 0.4;
            total_bees += 0.5;
        }

        let last = trajectory.state_at(1000).unwrap();
        assert!((last[0] - nectar).abs() < 1e-12);
        assert_eq!(last[1], workers);
        assert_eq!(last[2], total_bees);
    }

    #[test]
    fn rejects_seed_dimension_mismatch() {
        let rule = BalanceRule::growth();
        let grid = TimeGrid::new(0.0, 10.0, 1000).expect("grid");
        let seed = StateVector::scalar("nectar", 6.0);
        assert_err_contains(run(&rule, &grid, &seed), "seed dimension mismatch");
    }

    #[test]
    fn overflow_reports_the_step_and_variable() {
        let rule = GrowthLaw::exponential(10.0).expect("law");
        let grid = TimeGrid::new(0.0, 10.0, 10).expect("grid");
        let seed = StateVector::scalar("population", 1.0e308);
        let err = run(&rule, &grid, &seed).expect_err("overflow expected");
        match err {
            Error::NumericOverflow { step, variable } => {
                assert_eq!(step, 1);
                assert_eq!(variable, "population");
            }
            other => panic!("expected NumericOverflow, got {other:?}"),
        }
    }
}
