//! Background workers owned by the runtime.

mod simulation;

pub(crate) use simulation::{Command, SimulationWorker};
pub use simulation::StepOutcome;
