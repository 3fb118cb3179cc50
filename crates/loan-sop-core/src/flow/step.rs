use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{SopError, SopResult};

/// Stages of the linear Welcome → Form → Preview flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Welcome = 0,
    Form = 1,
    Preview = 2,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Welcome, Step::Form, Step::Preview];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::Welcome => "Welcome",
            Step::Form => "Form",
            Step::Preview => "Preview",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User actions that may move the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Start,
    Preview,
    Submit,
    Back,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StepAction::Start => "start",
            StepAction::Preview => "preview",
            StepAction::Submit => "submit",
            StepAction::Back => "go back",
        })
    }
}

/// The only transitions the flow allows.
pub fn next_step(from: Step, action: StepAction) -> Option<Step> {
    match (from, action) {
        (Step::Welcome, StepAction::Start) => Some(Step::Form),
        (Step::Form, StepAction::Preview) | (Step::Form, StepAction::Submit) => Some(Step::Preview),
        (Step::Preview, StepAction::Back) => Some(Step::Form),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub step: Step,
    pub label: String,
    pub percent_complete: u8,
}

/// Tracks the single active step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepController {
    current: Step,
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Step {
        self.current
    }

    /// Apply an action. Disallowed actions leave the step unchanged.
    pub fn apply(&mut self, action: StepAction) -> SopResult<Step> {
        match next_step(self.current, action) {
            Some(next) => {
                info!(from = %self.current, to = %next, %action, "step transition");
                self.current = next;
                Ok(next)
            }
            None => {
                warn!(from = %self.current, %action, "transition rejected");
                Err(SopError::InvalidTransition {
                    from: self.current.to_string(),
                    action: action.to_string(),
                })
            }
        }
    }

    /// Require the flow to be at `step` before performing `action`.
    pub fn expect(&self, step: Step, action: &str) -> SopResult<()> {
        if self.current == step {
            Ok(())
        } else {
            Err(SopError::InvalidTransition {
                from: self.current.to_string(),
                action: action.to_string(),
            })
        }
    }

    pub fn progress(&self) -> Progress {
        let last = Step::ALL.len() - 1;
        let index = self.current.index();
        Progress {
            step: self.current,
            label: format!("Step {index} of {last}"),
            percent_complete: ((index * 100) / last) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_welcome() {
        let c = StepController::new();
        assert_eq!(c.current(), Step::Welcome);
        assert_eq!(c.current().index(), 0);
    }

    #[test]
    fn test_happy_path() {
        let mut c = StepController::new();
        assert_eq!(c.apply(StepAction::Start).unwrap(), Step::Form);
        assert_eq!(c.apply(StepAction::Preview).unwrap(), Step::Preview);
        assert_eq!(c.apply(StepAction::Back).unwrap(), Step::Form);
        assert_eq!(c.apply(StepAction::Submit).unwrap(), Step::Preview);
    }

    #[test]
    fn test_only_four_transitions_exist() {
        let actions = [
            StepAction::Start,
            StepAction::Preview,
            StepAction::Submit,
            StepAction::Back,
        ];
        let allowed: Vec<_> = Step::ALL
            .into_iter()
            .flat_map(|s| actions.into_iter().map(move |a| (s, a)))
            .filter(|(s, a)| next_step(*s, *a).is_some())
            .collect();
        assert_eq!(
            allowed,
            vec![
                (Step::Welcome, StepAction::Start),
                (Step::Form, StepAction::Preview),
                (Step::Form, StepAction::Submit),
                (Step::Preview, StepAction::Back),
            ]
        );
    }

    #[test]
    fn test_rejected_transition_keeps_step() {
        let mut c = StepController::new();
        let err = c.apply(StepAction::Back).unwrap_err();
        match err {
            SopError::InvalidTransition { from, action } => {
                assert_eq!(from, "Welcome");
                assert_eq!(action, "go back");
            }
            other => panic!("Expected InvalidTransition, got {other:?}"),
        }
        assert_eq!(c.current(), Step::Welcome);
    }

    #[test]
    fn test_progress() {
        let mut c = StepController::new();
        assert_eq!(c.progress().percent_complete, 0);
        c.apply(StepAction::Start).unwrap();
        let p = c.progress();
        assert_eq!(p.label, "Step 1 of 2");
        assert_eq!(p.percent_complete, 50);
        c.apply(StepAction::Preview).unwrap();
        assert_eq!(c.progress().percent_complete, 100);
    }
}
