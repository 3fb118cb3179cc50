//! The step controller and the session that ties form and preview together.

pub mod session;
pub mod step;

pub use session::{FlowSession, FlowView, StepView, SubmitOutcome, WelcomeView};
pub use step::{next_step, Progress, Step, StepAction, StepController};
