use thiserror::Error;

/// Simulation result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the simulator. All of them abort the run at the
/// point of detection; a partially computed trajectory is never
/// returned.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration, detected before any step executes.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A queried time has no covering phase.
    #[error("time {t} is outside the phase table, which covers [{start}, {end})")]
    OutOfRange { t: f64, start: f64, end: f64 },

    /// A tracked variable became non-finite during a step.
    #[error("variable `{variable}` became non-finite at step {step}")]
    NumericOverflow { step: usize, variable: String },
}
