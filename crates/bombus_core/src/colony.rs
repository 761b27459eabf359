//! Bombus impatiens scenario presets.
//!
//! Every literal coefficient comes from the Bombus impatiens colony
//! model:
//! piecewise-linear caste curves (workers, drones, new queens), the
//! coupled nectar/bee balance in its growth and decline
//! configurations, and the multi-season population growth laws with
//! the neonicotinoid exposure chain.

use crate::error;
use crate::grid::TimeGrid;
use crate::integrator;
use crate::phase::{Continuity, Phase, PhaseTable};
use crate::rules::{BalanceRule, GrowthLaw, BALANCE_VARIABLES};
use crate::state::StateVector;
use crate::trajectory::Trajectory;
use anyhow::{anyhow, Context, Result};

/// Environmental carrying capacity for the multi-season models.
pub const CARRYING_CAPACITY: f64 = 1.0e12;

/// Worker bees emerge linearly from day 0, hold at 85 individuals,
/// then die off from day 180. All transitions are continuous by
/// construction, which `Continuity::Required` verifies.
pub fn worker_phases() -> error::Result<PhaseTable> {
    PhaseTable::new(
        vec![
            Phase::linear(0.0, 70.0, 1.2, 1.0),
            Phase::linear(70.0, 180.0, 0.0, 85.0),
            Phase::linear(180.0, 240.0, -3.0, 625.0),
        ],
        Continuity::Required(1e-9),
    )
}

/// Drone males hatch after the first worker cohort.
pub fn drone_phases() -> error::Result<PhaseTable> {
    PhaseTable::new(
        vec![
            Phase::linear(90.0, 120.0, 1.0, -90.0),
            Phase::linear(120.0, 180.0, 0.0, 30.0),
            Phase::linear(180.0, 210.0, -2.0, 390.0),
        ],
        Continuity::Required(1e-9),
    )
}

/// New queens appear late in the season and survive the winter, so
/// their final segment is open-ended.
pub fn queen_phases() -> error::Result<PhaseTable> {
    PhaseTable::new(
        vec![
            Phase::linear(160.0, 165.0, 2.0, -320.0),
            Phase::linear_open(165.0, 0.0, 10.0),
        ],
        Continuity::Required(1e-9),
    )
}

/// Worker count sampled at 0.1-day resolution over the colony's life.
pub fn worker_curve() -> Result<Trajectory> {
    let table = worker_phases().context("worker phase table")?;
    let grid = TimeGrid::new(0.0, 239.9, 2399)?;
    table.profile(&grid, "workers").context("worker curve")
}

/// Drone count sampled at 0.1-day resolution over the drones' span.
pub fn drone_curve() -> Result<Trajectory> {
    let table = drone_phases().context("drone phase table")?;
    let grid = TimeGrid::new(90.0, 209.9, 1199)?;
    table.profile(&grid, "drones").context("drone curve")
}

/// Queen count sampled at 0.1-day resolution into the overwintering
/// tail.
pub fn queen_curve() -> Result<Trajectory> {
    let table = queen_phases().context("queen phase table")?;
    let grid = TimeGrid::new(160.0, 300.0, 1400)?;
    table.profile(&grid, "queens").context("queen curve")
}

fn balance_seed(nectar: f64, workers: f64, total_bees: f64) -> error::Result<StateVector> {
    StateVector::new(&[
        (BALANCE_VARIABLES[0], nectar),
        (BALANCE_VARIABLES[1], workers),
        (BALANCE_VARIABLES[2], total_bees),
    ])
}

/// Nectar stores and bee populations during early colony development
/// (the month of May): 1000 steps over ten days.
pub fn nectar_growth() -> Result<Trajectory> {
    let rule = BalanceRule::growth();
    let grid = TimeGrid::new(0.0, 10.0, 1000)?;
    let seed = balance_seed(6.0, 5.0, 10.0)?;
    integrator::run(&rule, &grid, &seed).context("nectar balance, growth configuration")
}

/// Nectar stores and bee populations once colony decline begins
/// (fall).
pub fn nectar_decline() -> Result<Trajectory> {
    let rule = BalanceRule::decline();
    let grid = TimeGrid::new(0.0, 10.0, 1000)?;
    let seed = balance_seed(1200.0, 200.0, 250.0)?;
    integrator::run(&rule, &grid, &seed).context("nectar balance, decline configuration")
}

/// Population growth over twelve seasons with infinite resources.
pub fn exponential_growth() -> Result<Trajectory> {
    let rule = GrowthLaw::exponential(0.04)?;
    let grid = TimeGrid::new(0.0, 12.0, 1200)?;
    let seed = StateVector::scalar("population", 50.0);
    integrator::run(&rule, &grid, &seed).context("exponential growth")
}

/// Population growth over twelve seasons with finite resources.
pub fn logistic_growth() -> Result<Trajectory> {
    let rule = GrowthLaw::logistic(0.04, CARRYING_CAPACITY)?;
    let grid = TimeGrid::new(0.0, 12.0, 1200)?;
    let seed = StateVector::scalar("population", 50.0);
    integrator::run(&rule, &grid, &seed).context("logistic growth")
}

/// Logistic growth until year eight, then neonicotinoid exposure:
/// growth constant drops to `k = 0.03` against a death proportion
/// `d = 0.05`, an exponential decline. The exposure run is seeded
/// from the healthy run's final snapshot and the two trajectories are
/// chained into one history.
pub fn pesticide_shock() -> Result<Trajectory> {
    let healthy = GrowthLaw::logistic(0.0394, CARRYING_CAPACITY)?;
    let pre_grid = TimeGrid::new(0.0, 8.0, 800)?;
    let seed = StateVector::scalar("population", 50.0);
    let mut trajectory =
        integrator::run(&healthy, &pre_grid, &seed).context("pre-exposure segment")?;

    let exposed = GrowthLaw::exponential(0.03 - 0.05)?;
    let post_grid = TimeGrid::new(8.0, 12.0, 400)?;
    let exposure_seed = trajectory
        .final_state()
        .ok_or_else(|| anyhow!("pre-exposure segment produced no snapshots"))?;
    let decline =
        integrator::run(&exposed, &post_grid, &exposure_seed).context("exposure segment")?;

    trajectory
        .extend_with(decline)
        .context("chaining exposure onto the healthy run")?;
    Ok(trajectory)
}
