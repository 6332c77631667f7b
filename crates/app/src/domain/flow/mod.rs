//! Shopping flow

pub mod guard;
pub mod steps;

pub use guard::{INCOMPLETE_SELECTION_MESSAGE, StepRedirect, guard};
pub use steps::{FlowStep, UnknownStep};
