//! Authentication flow controller.
//!
//! Owns the form fields and the loading/error surfaces for one open
//! modal session and drives an [`IdentityProvider`]. Every collaborator
//! error is surfaced as an inline message; nothing crosses the
//! controller boundary as an error.

use booking_core::UserRole;
use identity_client::{
    FederatedProvider, IdentityError, IdentityProvider, SignInOutcome, SignUpOutcome,
    SignUpRequest,
};
use tracing::debug;

use crate::machine::{AuthFlowEvent, AuthMachine, AuthStep};

/// Form field values for the whole wizard.
///
/// Credentials are retained across steps: the confirmation step reuses
/// them for the explicit follow-up sign-in, and toggling between the
/// sign-in and sign-up forms keeps what was typed.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: UserRole,
    pub code: String,
}

/// What the shell should do after a controller call settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlowOutcome {
    /// A complete session exists; close the modal and refresh.
    Authenticated,
    /// The modal stays open on whatever step the machine is now in.
    Pending,
    /// The call was a no-op (wrong step, or a submit already in flight).
    Ignored,
}

pub struct AuthFlowController {
    machine: AuthMachine,
    pub form: AuthForm,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl Default for AuthFlowController {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthFlowController {
    pub fn new() -> Self {
        Self {
            machine: AuthMachine::new(),
            form: AuthForm::default(),
            loading: false,
            error: None,
            notice: None,
        }
    }

    pub fn step(&self) -> AuthStep {
        self.machine.step()
    }

    /// True while a submit is awaiting the identity provider. The UI
    /// disables every trigger while this holds.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Switch between the sign-in and sign-up forms. Ignored once a
    /// confirmation challenge is pending. Clears messages and the
    /// loading flag; field values are retained.
    pub fn toggle_mode(&mut self) {
        if !self.machine.step().can_toggle() {
            return;
        }
        self.error = None;
        self.notice = None;
        self.loading = false;
        self.machine.handle_event(AuthFlowEvent::ToggleRequested);
    }

    /// Submit the sign-in form.
    pub async fn submit_sign_in(&mut self, provider: &dyn IdentityProvider) -> AuthFlowOutcome {
        if self.loading || self.machine.step() != AuthStep::SignIn {
            return AuthFlowOutcome::Ignored;
        }
        self.error = None;
        self.notice = None;
        self.loading = true;
        let outcome = self.sign_in_settled(provider).await;
        self.loading = false;
        outcome
    }

    async fn sign_in_settled(&mut self, provider: &dyn IdentityProvider) -> AuthFlowOutcome {
        match provider
            .sign_in(&self.form.email, &self.form.password)
            .await
        {
            Ok(SignInOutcome::Completed) => AuthFlowOutcome::Authenticated,
            Ok(SignInOutcome::ConfirmationRequired) => {
                self.machine.handle_event(AuthFlowEvent::ChallengeIssued);
                AuthFlowOutcome::Pending
            }
            // An unconfirmed account is a challenge, not a dead end.
            Err(IdentityError::AccountUnconfirmed) => {
                self.machine.handle_event(AuthFlowEvent::ChallengeIssued);
                self.notice = Some(IdentityError::AccountUnconfirmed.to_string());
                AuthFlowOutcome::Pending
            }
            Err(err) => {
                debug!(error = %err, "sign-in rejected");
                self.machine.handle_event(AuthFlowEvent::SubmissionRejected);
                self.error = Some(err.to_string());
                AuthFlowOutcome::Pending
            }
        }
    }

    /// Submit the registration form. The role travels to the provider as
    /// a custom profile attribute.
    pub async fn submit_sign_up(&mut self, provider: &dyn IdentityProvider) -> AuthFlowOutcome {
        if self.loading || self.machine.step() != AuthStep::SignUp {
            return AuthFlowOutcome::Ignored;
        }
        self.error = None;
        self.notice = None;
        self.loading = true;
        let outcome = self.sign_up_settled(provider).await;
        self.loading = false;
        outcome
    }

    async fn sign_up_settled(&mut self, provider: &dyn IdentityProvider) -> AuthFlowOutcome {
        let request = SignUpRequest {
            email: self.form.email.clone(),
            password: self.form.password.clone(),
            display_name: self.form.display_name.clone(),
            role: self.form.role,
        };
        match provider.sign_up(request).await {
            Ok(SignUpOutcome::ConfirmationRequired) => {
                self.machine.handle_event(AuthFlowEvent::ChallengeIssued);
                AuthFlowOutcome::Pending
            }
            Ok(SignUpOutcome::AutoSignedIn) => AuthFlowOutcome::Authenticated,
            Err(err) => {
                debug!(error = %err, "sign-up rejected");
                self.machine.handle_event(AuthFlowEvent::SubmissionRejected);
                self.error = Some(err.to_string());
                AuthFlowOutcome::Pending
            }
        }
    }

    /// Submit the confirmation code, then perform an explicit follow-up
    /// sign-in with the retained credentials. The provider's auto-sign-in
    /// after confirmation is not assumed reliable.
    pub async fn submit_code(&mut self, provider: &dyn IdentityProvider) -> AuthFlowOutcome {
        if self.loading || self.machine.step() != AuthStep::ConfirmSignUp {
            return AuthFlowOutcome::Ignored;
        }
        self.error = None;
        self.notice = None;
        self.loading = true;
        let outcome = self.code_settled(provider).await;
        self.loading = false;
        outcome
    }

    async fn code_settled(&mut self, provider: &dyn IdentityProvider) -> AuthFlowOutcome {
        if let Err(err) = provider
            .confirm_sign_up(&self.form.email, &self.form.code)
            .await
        {
            debug!(error = %err, "confirmation rejected");
            self.machine.handle_event(AuthFlowEvent::SubmissionRejected);
            self.error = Some(err.to_string());
            return AuthFlowOutcome::Pending;
        }

        match provider
            .sign_in(&self.form.email, &self.form.password)
            .await
        {
            Ok(SignInOutcome::Completed) => AuthFlowOutcome::Authenticated,
            _ => {
                self.machine.handle_event(AuthFlowEvent::VerifiedNeedsSignIn);
                self.notice = Some("Account verified. Please log in.".to_string());
                AuthFlowOutcome::Pending
            }
        }
    }

    /// Delegate the whole flow to an external provider. No step change;
    /// completion arrives as a session event on the shell side.
    pub async fn federated_sign_in(
        &mut self,
        provider: &dyn IdentityProvider,
        which: FederatedProvider,
    ) -> AuthFlowOutcome {
        if self.loading || self.machine.step() != AuthStep::SignIn {
            return AuthFlowOutcome::Ignored;
        }
        self.loading = true;
        let result = provider.federated_sign_in(which).await;
        self.loading = false;
        if let Err(err) = result {
            self.error = Some(err.to_string());
        }
        AuthFlowOutcome::Pending
    }
}
