//! Deterministic in-memory identity provider.
//!
//! Used by tests and local development. Confirmation codes are fixed so
//! flows can be exercised end to end without a mail inbox.

use std::collections::HashMap;

use async_trait::async_trait;
use booking_core::{UserProfile, UserRole};
use tokio::sync::broadcast;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{IdentityError, Result};
use crate::events::{SessionEvent, SessionEvents};
use crate::provider::{
    FederatedProvider, IdentityProvider, SignInOutcome, SignUpOutcome, SignUpRequest,
};

/// The code issued to every pending registration.
pub const CONFIRMATION_CODE: &str = "123456";

#[derive(Debug, Clone)]
struct StoredUser {
    password: String,
    display_name: String,
    role: UserRole,
    bio: Option<String>,
    confirmed: bool,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<String, StoredUser>,
    current: Option<String>,
}

/// In-memory [`IdentityProvider`] implementation.
pub struct InMemoryIdentity {
    state: Mutex<State>,
    events: SessionEvents,
    auto_confirm: bool,
}

impl Default for InMemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            events: SessionEvents::new(),
            auto_confirm: false,
        }
    }

    /// Skip the confirmation challenge: sign-ups are confirmed and
    /// signed in immediately.
    pub fn with_auto_confirm(mut self) -> Self {
        self.auto_confirm = true;
        self
    }

    /// Seed an already-confirmed account.
    pub async fn seed_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: UserRole,
    ) {
        let mut state = self.state.lock().await;
        state.users.insert(
            email.to_string(),
            StoredUser {
                password: password.to_string(),
                display_name: display_name.to_string(),
                role,
                bio: None,
                confirmed: true,
            },
        );
    }

    fn profile_of(email: &str, user: &StoredUser) -> UserProfile {
        UserProfile {
            email: email.to_string(),
            display_name: user.display_name.clone(),
            role: user.role,
            bio: user.bio.clone(),
            avatar: None,
        }
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInOutcome> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get(email)
            .ok_or(IdentityError::UserNotFound)?
            .clone();

        if user.password != password {
            return Err(IdentityError::CredentialsRejected);
        }
        if !user.confirmed {
            return Err(IdentityError::AccountUnconfirmed);
        }

        state.current = Some(email.to_string());
        drop(state);

        debug!(email, "in-memory sign-in completed");
        self.events.emit(SessionEvent::SignedIn);
        Ok(SignInOutcome::Completed)
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpOutcome> {
        let mut state = self.state.lock().await;
        if state.users.contains_key(&request.email) {
            return Err(IdentityError::UserExists);
        }

        state.users.insert(
            request.email.clone(),
            StoredUser {
                password: request.password,
                display_name: request.display_name,
                role: request.role,
                bio: None,
                confirmed: self.auto_confirm,
            },
        );

        if self.auto_confirm {
            state.current = Some(request.email.clone());
            drop(state);
            self.events.emit(SessionEvent::SignedIn);
            return Ok(SignUpOutcome::AutoSignedIn);
        }

        debug!(email = %request.email, "registration pending confirmation");
        Ok(SignUpOutcome::ConfirmationRequired)
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(email)
            .ok_or(IdentityError::UserNotFound)?;

        if user.confirmed || code != CONFIRMATION_CODE {
            return Err(IdentityError::InvalidCode);
        }

        // Confirmation does not issue a session; callers perform an
        // explicit follow-up sign-in.
        user.confirmed = true;
        Ok(())
    }

    async fn current_user(&self) -> Result<UserProfile> {
        let state = self.state.lock().await;
        let email = state.current.as_ref().ok_or(IdentityError::NotSignedIn)?;
        let user = state.users.get(email).ok_or(IdentityError::NotSignedIn)?;
        Ok(Self::profile_of(email, user))
    }

    async fn sign_out(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.current = None;
        drop(state);
        self.events.emit(SessionEvent::SignedOut);
        Ok(())
    }

    async fn federated_sign_in(&self, provider: FederatedProvider) -> Result<()> {
        // The external provider does everything; locally we only mint the
        // resulting session and announce it.
        let email = match provider {
            FederatedProvider::Google => "federated@google",
            FederatedProvider::Apple => "federated@apple",
        };
        let mut state = self.state.lock().await;
        state.users.entry(email.to_string()).or_insert(StoredUser {
            password: String::new(),
            display_name: "Federated User".to_string(),
            role: UserRole::Guest,
            bio: None,
            confirmed: true,
        });
        state.current = Some(email.to_string());
        drop(state);
        self.events.emit(SessionEvent::SignedIn);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
