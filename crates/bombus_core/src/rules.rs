use crate::error::{Error, Result};
use crate::traits::StepRule;
use serde::{Deserialize, Serialize};

/// Coupled nectar/bee balance:
///
/// ```text
/// d nectar    = -kc * totalBees + kp * workers
/// d workers   = dw
/// d totalBees = db
/// ```
///
/// The deltas are the source model's per-step constants and are
/// applied as-is, independent of `dt`. A configuration (growth or
/// decline) is chosen by the caller before the run starts and never
/// switched mid-run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BalanceRule {
    /// Consumption constant for the average bee in the colony.
    kc: f64,
    /// Production constant per worker bee.
    kp: f64,
    /// Per-step change in the worker count.
    dw: f64,
    /// Per-step change in the total bee count.
    db: f64,
}

/// Variable order expected by [`BalanceRule`].
pub const BALANCE_VARIABLES: [&str; 3] = ["nectar", "workers", "totalBees"];

impl BalanceRule {
    pub fn new(kc: f64, kp: f64, dw: f64, db: f64) -> Result<Self> {
        for (name, value) in [("kc", kc), ("kp", kp), ("dw", dw), ("db", db)] {
            if !value.is_finite() {
                return Err(Error::Config(format!(
                    "balance constant {name} must be finite, got {value}"
                )));
            }
        }
        Ok(Self { kc, kp, dw, db })
    }

    /// Early colony development (spring): workers and brood are added
    /// every step and nectar stores build up.
    pub fn growth() -> Self {
        Self {
            kc: 0.005,
            kp: 0.01,
            dw: 0.4,
            db: 0.5,
        }
    }

    /// Colony decline (fall): the workforce shrinks and consumption
    /// outpaces production.
    pub fn decline() -> Self {
        Self {
            kc: 0.008,
            kp: 0.01,
            dw: -0.2,
            db: -0.1,
        }
    }
}

impl StepRule<f64> for BalanceRule {
    fn dimension(&self) -> usize {
        BALANCE_VARIABLES.len()
    }

    fn delta(&self, _t: f64, _dt: f64, state: &[f64], out: &mut [f64]) -> Result<()> {
        let workers = state[1];
        let total_bees = state[2];
        out[0] = -self.kc * total_bees + self.kp * workers;
        out[1] = self.dw;
        out[2] = self.db;
        Ok(())
    }
}

/// Scalar population growth law over a single tracked variable.
/// These model continuous laws, so the increment scales with `dt`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum GrowthLaw {
    /// Infinite resources: `dx/dt = k * x`.
    Exponential { k: f64 },
    /// Finite resources: `dx/dt = k * x * (1 - x / capacity)`.
    Logistic { k: f64, capacity: f64 },
}

impl GrowthLaw {
    pub fn exponential(k: f64) -> Result<Self> {
        if !k.is_finite() {
            return Err(Error::Config(format!(
                "growth constant must be finite, got {k}"
            )));
        }
        Ok(Self::Exponential { k })
    }

    pub fn logistic(k: f64, capacity: f64) -> Result<Self> {
        if !k.is_finite() {
            return Err(Error::Config(format!(
                "growth constant must be finite, got {k}"
            )));
        }
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(Error::Config(format!(
                "logistic capacity must be positive, got {capacity}"
            )));
        }
        Ok(Self::Logistic { k, capacity })
    }
}

impl StepRule<f64> for GrowthLaw {
    fn dimension(&self) -> usize {
        1
    }

    fn delta(&self, _t: f64, dt: f64, state: &[f64], out: &mut [f64]) -> Result<()> {
        let value = state[0];
        out[0] = match *self {
            GrowthLaw::Exponential { k } => k * value * dt,
            GrowthLaw::Logistic { k, capacity } => k * value * (1.0 - value / capacity) * dt,
        };
        Ok(())
    }
}
