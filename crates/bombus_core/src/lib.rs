//! The `bombus_core` crate is the numeric engine behind the Bombus
//! colony dynamics models: a fixed-step explicit-Euler simulator
//! driven by per-phase parameter tables. Rendering is out of scope;
//! consumers take the produced [`trajectory::Trajectory`] values and
//! plot them however they like.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric type abstraction), `StepRule`
//!   (per-step update rules), `Steppable` (steppers).
//! - **Phase tables**: declarative piecewise rules with a checked
//!   evaluator.
//! - **Integrator**: the run loop producing trajectories, with
//!   fail-fast configuration and overflow checks.
//! - **Colony**: the concrete Bombus impatiens scenarios.

pub mod colony;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod phase;
pub mod rules;
pub mod solvers;
pub mod state;
pub mod traits;
pub mod trajectory;

pub use error::{Error, Result};
