//! Step transition logic for the authentication wizard.

use tracing::debug;

use super::events::AuthFlowEvent;
use super::states::AuthStep;

/// Represents one step transition.
#[derive(Debug, Clone)]
pub struct StepTransition {
    /// The step before the transition.
    pub from: AuthStep,
    /// The step after the transition.
    pub to: AuthStep,
    /// The event that triggered the transition.
    pub event: AuthFlowEvent,
    /// Whether the step actually changed.
    pub changed: bool,
}

/// Step machine for one authentication modal session.
#[derive(Debug, Clone)]
pub struct AuthMachine {
    current_step: AuthStep,
    /// Transition history (limited).
    history: Vec<StepTransition>,
    max_history: usize,
}

impl Default for AuthMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthMachine {
    /// Create a new machine at the sign-in step.
    pub fn new() -> Self {
        Self {
            current_step: AuthStep::SignIn,
            history: Vec::new(),
            max_history: 50,
        }
    }

    /// Create a machine at a specific step.
    pub fn with_step(step: AuthStep) -> Self {
        Self {
            current_step: step,
            history: Vec::new(),
            max_history: 50,
        }
    }

    pub fn step(&self) -> AuthStep {
        self.current_step
    }

    pub fn history(&self) -> &[StepTransition] {
        &self.history
    }

    /// Handle an event and move to the next step.
    pub fn handle_event(&mut self, event: AuthFlowEvent) -> StepTransition {
        let from = self.current_step;
        let to = Self::compute_next_step(from, event);
        let changed = from != to;

        if changed {
            debug!(?from, ?to, ?event, "auth step transition");
        }
        self.current_step = to;

        let transition = StepTransition {
            from,
            to,
            event,
            changed,
        };
        self.history.push(transition.clone());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        transition
    }

    /// Compute the next step given the current step and an event.
    /// Unmatched pairs stay on the current step.
    fn compute_next_step(step: AuthStep, event: AuthFlowEvent) -> AuthStep {
        use AuthFlowEvent::*;
        use AuthStep::*;

        match (step, event) {
            (SignIn, ToggleRequested) => SignUp,
            (SignUp, ToggleRequested) => SignIn,

            // A challenge can arrive from either form: an unverified
            // sign-in or a fresh registration.
            (SignIn, ChallengeIssued) => ConfirmSignUp,
            (SignUp, ChallengeIssued) => ConfirmSignUp,

            (ConfirmSignUp, VerifiedNeedsSignIn) => SignIn,

            _ => step,
        }
    }

    /// Check whether an event would change the step, without executing it.
    pub fn can_transition(&self, event: AuthFlowEvent) -> bool {
        Self::compute_next_step(self.current_step, event) != self.current_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let mut machine = AuthMachine::new();
        assert_eq!(machine.step(), AuthStep::SignIn);

        let t1 = machine.handle_event(AuthFlowEvent::ToggleRequested);
        assert!(t1.changed);
        assert_eq!(machine.step(), AuthStep::SignUp);

        machine.handle_event(AuthFlowEvent::ToggleRequested);
        assert_eq!(machine.step(), AuthStep::SignIn);
    }

    #[test]
    fn test_challenge_moves_to_confirm_from_both_forms() {
        let mut from_sign_in = AuthMachine::new();
        from_sign_in.handle_event(AuthFlowEvent::ChallengeIssued);
        assert_eq!(from_sign_in.step(), AuthStep::ConfirmSignUp);

        let mut from_sign_up = AuthMachine::with_step(AuthStep::SignUp);
        from_sign_up.handle_event(AuthFlowEvent::ChallengeIssued);
        assert_eq!(from_sign_up.step(), AuthStep::ConfirmSignUp);
    }

    #[test]
    fn test_rejection_stays_put() {
        let mut machine = AuthMachine::with_step(AuthStep::ConfirmSignUp);
        let t = machine.handle_event(AuthFlowEvent::SubmissionRejected);
        assert!(!t.changed);
        assert_eq!(machine.step(), AuthStep::ConfirmSignUp);
    }

    #[test]
    fn test_toggle_is_ignored_while_confirming() {
        let mut machine = AuthMachine::with_step(AuthStep::ConfirmSignUp);
        assert!(!machine.can_transition(AuthFlowEvent::ToggleRequested));
        machine.handle_event(AuthFlowEvent::ToggleRequested);
        assert_eq!(machine.step(), AuthStep::ConfirmSignUp);
    }

    #[test]
    fn test_verified_needs_sign_in_returns_to_sign_in() {
        let mut machine = AuthMachine::with_step(AuthStep::ConfirmSignUp);
        machine.handle_event(AuthFlowEvent::VerifiedNeedsSignIn);
        assert_eq!(machine.step(), AuthStep::SignIn);
    }

    #[test]
    fn test_history_tracking() {
        let mut machine = AuthMachine::new();
        machine.handle_event(AuthFlowEvent::ToggleRequested);
        machine.handle_event(AuthFlowEvent::ChallengeIssued);
        assert_eq!(machine.history().len(), 2);
    }
}
