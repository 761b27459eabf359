use crate::error::{Error, Result};
use crate::grid::TimeGrid;
use crate::traits::StepRule;
use crate::trajectory::Trajectory;
use serde::{Deserialize, Serialize};

/// The rule attached to one phase of a phase table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PhaseRule {
    /// Direct evaluation `slope * t + intercept`, no accumulation.
    Linear { slope: f64, intercept: f64 },
    /// Per-step increment applied to a running state (integrated mode).
    Increment { delta: f64 },
}

/// A half-open time interval `[start, end)` with an associated rule.
/// `end: None` marks a declared open-ended ("flat") tail, legal only
/// on the last phase of a table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Phase {
    start: f64,
    end: Option<f64>,
    rule: PhaseRule,
}

impl Phase {
    pub fn linear(start: f64, end: f64, slope: f64, intercept: f64) -> Self {
        Self {
            start,
            end: Some(end),
            rule: PhaseRule::Linear { slope, intercept },
        }
    }

    /// Open-ended linear phase: its rule applies for all `t >= start`.
    pub fn linear_open(start: f64, slope: f64, intercept: f64) -> Self {
        Self {
            start,
            end: None,
            rule: PhaseRule::Linear { slope, intercept },
        }
    }

    pub fn increment(start: f64, end: f64, delta: f64) -> Self {
        Self {
            start,
            end: Some(end),
            rule: PhaseRule::Increment { delta },
        }
    }

    pub fn increment_open(start: f64, delta: f64) -> Self {
        Self {
            start,
            end: None,
            rule: PhaseRule::Increment { delta },
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    pub fn rule(&self) -> PhaseRule {
        self.rule
    }

    fn contains(&self, t: f64) -> bool {
        t >= self.start && self.end.map_or(true, |end| t < end)
    }

    /// Pointwise value of a linear phase at `t`.
    fn value_at(&self, t: f64) -> Result<f64> {
        match self.rule {
            PhaseRule::Linear { slope, intercept } => Ok(slope * t + intercept),
            PhaseRule::Increment { .. } => Err(Error::Config(format!(
                "phase starting at {} is integrated-mode and has no pointwise value",
                self.start
            ))),
        }
    }
}

/// Whether adjacent linear phases are required to agree at their
/// shared boundary. The source curves happen to be continuous, but
/// that is a property of their coefficients, not of the table; it is
/// only enforced when explicitly requested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Continuity {
    Unchecked,
    /// Adjacent linear phases must agree at shared boundaries within
    /// the given absolute tolerance.
    Required(f64),
}

/// An ordered, contiguous list of phases with a lookup and a
/// piecewise-linear evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTable {
    phases: Vec<Phase>,
}

impl PhaseTable {
    pub fn new(phases: Vec<Phase>, continuity: Continuity) -> Result<Self> {
        if phases.is_empty() {
            return Err(Error::Config(
                "phase table must contain at least one phase".to_string(),
            ));
        }

        for phase in &phases {
            if !phase.start.is_finite() {
                return Err(Error::Config(format!(
                    "phase start {} is not finite",
                    phase.start
                )));
            }
            if let Some(end) = phase.end {
                if !end.is_finite() || end <= phase.start {
                    return Err(Error::Config(format!(
                        "phase interval [{}, {end}) is empty or unbounded",
                        phase.start
                    )));
                }
            }
        }

        for pair in phases.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            let Some(end) = left.end else {
                return Err(Error::Config(format!(
                    "open-ended phase starting at {} must be last",
                    left.start
                )));
            };
            if right.start > end {
                return Err(Error::Config(format!(
                    "gap between phases: [{}..{end}) then [{}..)",
                    left.start, right.start
                )));
            }
            if right.start < end {
                return Err(Error::Config(format!(
                    "overlapping phases: [{}..{end}) then [{}..)",
                    left.start, right.start
                )));
            }
            if let Continuity::Required(tol) = continuity {
                if let (PhaseRule::Linear { .. }, PhaseRule::Linear { .. }) =
                    (left.rule, right.rule)
                {
                    let from_left = left.value_at(end)?;
                    let from_right = right.value_at(end)?;
                    if (from_left - from_right).abs() > tol {
                        return Err(Error::Config(format!(
                            "discontinuity at t = {end}: {from_left} vs {from_right} \
                             exceeds tolerance {tol}"
                        )));
                    }
                }
            }
        }

        Ok(Self { phases })
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn start(&self) -> f64 {
        self.phases[0].start
    }

    /// Declared end of the table; `None` when the last phase is
    /// open-ended.
    pub fn end(&self) -> Option<f64> {
        self.phases[self.phases.len() - 1].end
    }

    /// Returns the unique phase whose interval contains `t`.
    ///
    /// Half-open-interval semantics: a boundary instant shared by two
    /// phases belongs to the later one. Fails with `OutOfRange` when
    /// `t` precedes the first phase or falls at/after the declared end
    /// of the last phase.
    pub fn active(&self, t: f64) -> Result<&Phase> {
        self.phases
            .iter()
            .find(|phase| phase.contains(t))
            .ok_or_else(|| Error::OutOfRange {
                t,
                start: self.start(),
                end: self.end().unwrap_or(f64::INFINITY),
            })
    }

    /// Piecewise-linear evaluation at `t`, using the matched phase's
    /// own coefficients.
    pub fn evaluate(&self, t: f64) -> Result<f64> {
        self.active(t)?.value_at(t)
    }

    /// Samples `evaluate` over a grid into a single-variable
    /// trajectory (the caste-curve use).
    pub fn profile(&self, grid: &TimeGrid, variable: &str) -> Result<Trajectory> {
        let mut trajectory =
            Trajectory::with_capacity(vec![variable.to_string()], grid.sample_count());
        for t in grid.times() {
            trajectory.push(t, &[self.evaluate(t)?]);
        }
        Ok(trajectory)
    }
}

/// Integrated-mode adapter: a single-variable step rule driven by the
/// phase active at `t`. An `Increment` phase contributes its per-step
/// delta as-is; a `Linear` phase contributes its trend, `slope * dt`.
#[derive(Debug, Clone)]
pub struct PhasedRule {
    table: PhaseTable,
}

impl PhasedRule {
    pub fn new(table: PhaseTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PhaseTable {
        &self.table
    }
}

impl StepRule<f64> for PhasedRule {
    fn dimension(&self) -> usize {
        1
    }

    fn delta(&self, t: f64, dt: f64, _state: &[f64], out: &mut [f64]) -> Result<()> {
        out[0] = match self.table.active(t)?.rule {
            PhaseRule::Increment { delta } => delta,
            PhaseRule::Linear { slope, .. } => slope * dt,
        };
        Ok(())
    }
}
