//! Wizard steps of the authentication modal.

use serde::{Deserialize, Serialize};

/// The visible step of one authentication modal session.
///
/// There is no terminal step: a successful authentication closes the
/// modal and the whole machine is dropped with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStep {
    /// Collecting {email, password} for an existing account.
    SignIn,

    /// Collecting {name, email, password, role} for registration.
    SignUp,

    /// Collecting the emailed confirmation code.
    ConfirmSignUp,
}

impl Default for AuthStep {
    fn default() -> Self {
        AuthStep::SignIn
    }
}

impl AuthStep {
    /// The user may switch between sign-in and sign-up freely, but not
    /// once a confirmation challenge is pending.
    pub fn can_toggle(&self) -> bool {
        matches!(self, Self::SignIn | Self::SignUp)
    }

    pub fn description(&self) -> &str {
        match self {
            Self::SignIn => "Welcome Back",
            Self::SignUp => "Create Account",
            Self::ConfirmSignUp => "Check your inbox",
        }
    }
}
