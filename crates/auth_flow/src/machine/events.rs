//! Events that move the authentication wizard between steps.

use serde::{Deserialize, Serialize};

/// Events fed to the step machine.
///
/// Collaborator call results are translated into these by the
/// controller; the machine never sees provider errors directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFlowEvent {
    /// User switched between the sign-in and sign-up forms.
    ToggleRequested,

    /// The provider demands email confirmation before a session exists.
    ChallengeIssued,

    /// The submit settled with a recoverable failure; stay put.
    SubmissionRejected,

    /// Confirmation succeeded but the follow-up sign-in did not; the
    /// user must log in manually.
    VerifiedNeedsSignIn,
}

impl AuthFlowEvent {
    pub fn is_user_event(&self) -> bool {
        matches!(self, Self::ToggleRequested)
    }
}
