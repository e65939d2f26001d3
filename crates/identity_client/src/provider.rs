//! The identity collaborator contract.

use async_trait::async_trait;
use booking_core::{UserProfile, UserRole};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::Result;
use crate::events::SessionEvent;

/// Outcome of a sign-in attempt.
///
/// The provider's challenge protocol is modelled as a tagged result
/// rather than an exception side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    /// A complete session exists; the caller is authenticated.
    Completed,
    /// The provider demands email confirmation before a session is issued.
    ConfirmationRequired,
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// A confirmation code was sent; the account is not yet usable.
    ConfirmationRequired,
    /// The provider auto-confirmed and signed the user in directly.
    AutoSignedIn,
}

/// Registration payload. The role travels as a custom profile attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: UserRole,
}

/// External providers available for federated sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FederatedProvider {
    Google,
    Apple,
}

/// Contract consumed by the auth flow and the application shell.
///
/// All real credential work (validation, token issuance, confirmation
/// codes) happens behind this trait; the flows only interpret outcomes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInOutcome>;

    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpOutcome>;

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<()>;

    /// Profile of the current session; fails with `NotSignedIn` when no
    /// session exists.
    async fn current_user(&self) -> Result<UserProfile>;

    async fn sign_out(&self) -> Result<()>;

    /// Delegate the whole flow to an external provider. No local state
    /// transition happens here; completion arrives as a session event.
    async fn federated_sign_in(&self, provider: FederatedProvider) -> Result<()>;

    /// Session-change notification stream the shell subscribes to.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}
