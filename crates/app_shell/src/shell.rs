//! The application shell.

use std::sync::Arc;
use std::time::Duration;

use auth_flow::{AuthFlowController, AuthFlowOutcome};
use booking_core::{AuthSession, Booking, ServiceItem};
use booking_flow::BookingFlowController;
use concierge_client::ConciergeProvider;
use identity_client::{FederatedProvider, IdentityProvider, SessionEvent};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// The modal session currently owning the screen, if any.
pub enum ActiveModal {
    Auth(AuthFlowController),
    Booking(BookingFlowController),
}

/// Holds all session state and wires UI events to the flow controllers.
pub struct AppShell {
    identity: Arc<dyn IdentityProvider>,
    concierge: Arc<dyn ConciergeProvider>,
    /// Read-only catalog slice, supplied at construction.
    catalog: Vec<ServiceItem>,

    session: AuthSession,
    /// Confirmed bookings, newest first. Append-only for the session.
    bookings: Vec<Booking>,
    concierge_message: Option<String>,
    thinking: bool,
    active_modal: Option<ActiveModal>,
    profile_setup_open: bool,
    booking_confirm_delay: Duration,
}

impl AppShell {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        concierge: Arc<dyn ConciergeProvider>,
        catalog: Vec<ServiceItem>,
    ) -> Self {
        Self {
            identity,
            concierge,
            catalog,
            session: AuthSession::signed_out(),
            bookings: Vec::new(),
            concierge_message: None,
            thinking: false,
            active_modal: None,
            profile_setup_open: false,
            booking_confirm_delay: Duration::from_millis(400),
        }
    }

    /// Override the artificial booking-confirm delay (tests use zero).
    pub fn with_booking_confirm_delay(mut self, delay: Duration) -> Self {
        self.booking_confirm_delay = delay;
        self
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn concierge_message(&self) -> Option<&str> {
        self.concierge_message.as_deref()
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn active_modal(&self) -> Option<&ActiveModal> {
        self.active_modal.as_ref()
    }

    pub fn is_profile_setup_open(&self) -> bool {
        self.profile_setup_open
    }

    // ---- session lifecycle ----

    /// Pull the authoritative profile from the identity provider.
    ///
    /// Overwrites any optimistic local state (last write wins). A missing
    /// session clears everything; a profile without a bio opens the
    /// profile-setup step.
    pub async fn refresh_session(&mut self) {
        match self.identity.current_user().await {
            Ok(user) => {
                self.profile_setup_open = !user.is_profile_complete();
                self.session = AuthSession::signed_in(user);
            }
            Err(err) => {
                debug!(error = %err, "no current session");
                self.session = AuthSession::signed_out();
                self.profile_setup_open = false;
            }
        }
    }

    /// Session-change notification stream from the identity provider.
    /// The host drives received events into [`Self::handle_session_event`].
    pub fn session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.identity.subscribe()
    }

    /// React to a provider-side session change (e.g. external sign-out).
    pub async fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SignedIn => self.refresh_session().await,
            SessionEvent::SignedOut => {
                self.session = AuthSession::signed_out();
                self.profile_setup_open = false;
            }
        }
    }

    pub async fn sign_out(&mut self) {
        if let Err(err) = self.identity.sign_out().await {
            warn!(error = %err, "sign-out failed");
            return;
        }
        self.session = AuthSession::signed_out();
        self.profile_setup_open = false;
    }

    /// Optimistically mark the profile complete. The avatar reference is
    /// held locally only; the next authoritative refresh overwrites both.
    pub fn complete_profile(&mut self, bio: impl Into<String>, avatar: Option<String>) {
        if let Some(user) = self.session.user.as_mut() {
            user.bio = Some(bio.into());
            user.avatar = avatar;
        }
        self.profile_setup_open = false;
    }

    // ---- modals ----

    pub fn open_auth_modal(&mut self) {
        self.active_modal = Some(ActiveModal::Auth(AuthFlowController::new()));
    }

    /// Close whatever modal is open. An unconfirmed booking session is
    /// simply dropped; the ledger is untouched. A collaborator call still
    /// in flight settles into a controller nobody reads.
    pub fn close_modal(&mut self) {
        self.active_modal = None;
    }

    /// Start a booking for a catalog service.
    ///
    /// Unauthenticated users get the auth modal instead; the booking
    /// controller is never even instantiated for them.
    pub fn initiate_booking(&mut self, service_id: &str) {
        if !self.session.is_authenticated() {
            self.open_auth_modal();
            return;
        }
        match self.catalog.iter().find(|s| s.id == service_id) {
            Some(service) => {
                let controller = BookingFlowController::new(service.clone())
                    .with_confirm_delay(self.booking_confirm_delay);
                self.active_modal = Some(ActiveModal::Booking(controller));
            }
            None => warn!(service_id, "booking requested for unknown service"),
        }
    }

    /// Mutable access to the open auth controller (form edits, toggling).
    pub fn auth_controller_mut(&mut self) -> Option<&mut AuthFlowController> {
        match self.active_modal.as_mut() {
            Some(ActiveModal::Auth(controller)) => Some(controller),
            _ => None,
        }
    }

    /// Mutable access to the open booking controller (form edits, steps).
    pub fn booking_controller_mut(&mut self) -> Option<&mut BookingFlowController> {
        match self.active_modal.as_mut() {
            Some(ActiveModal::Booking(controller)) => Some(controller),
            _ => None,
        }
    }

    // ---- auth dispatch ----

    pub async fn submit_sign_in(&mut self) -> AuthFlowOutcome {
        let identity = Arc::clone(&self.identity);
        let Some(ActiveModal::Auth(controller)) = self.active_modal.as_mut() else {
            return AuthFlowOutcome::Ignored;
        };
        let outcome = controller.submit_sign_in(identity.as_ref()).await;
        self.settle_auth(outcome).await;
        outcome
    }

    pub async fn submit_sign_up(&mut self) -> AuthFlowOutcome {
        let identity = Arc::clone(&self.identity);
        let Some(ActiveModal::Auth(controller)) = self.active_modal.as_mut() else {
            return AuthFlowOutcome::Ignored;
        };
        let outcome = controller.submit_sign_up(identity.as_ref()).await;
        self.settle_auth(outcome).await;
        outcome
    }

    pub async fn submit_confirmation_code(&mut self) -> AuthFlowOutcome {
        let identity = Arc::clone(&self.identity);
        let Some(ActiveModal::Auth(controller)) = self.active_modal.as_mut() else {
            return AuthFlowOutcome::Ignored;
        };
        let outcome = controller.submit_code(identity.as_ref()).await;
        self.settle_auth(outcome).await;
        outcome
    }

    pub async fn federated_sign_in(&mut self, which: FederatedProvider) -> AuthFlowOutcome {
        let identity = Arc::clone(&self.identity);
        let Some(ActiveModal::Auth(controller)) = self.active_modal.as_mut() else {
            return AuthFlowOutcome::Ignored;
        };
        controller.federated_sign_in(identity.as_ref(), which).await
    }

    /// On authentication: close the modal and pull the fresh session.
    async fn settle_auth(&mut self, outcome: AuthFlowOutcome) {
        if outcome == AuthFlowOutcome::Authenticated {
            self.active_modal = None;
            self.refresh_session().await;
        }
    }

    // ---- booking dispatch ----

    /// Confirm the reviewed booking and commit it at the head of the
    /// ledger. Returns whether a booking was recorded.
    pub async fn confirm_booking(&mut self) -> bool {
        let Some(ActiveModal::Booking(controller)) = self.active_modal.as_mut() else {
            return false;
        };
        match controller.confirm().await {
            Some(booking) => {
                debug!(booking_id = %booking.id, "booking committed to ledger");
                self.bookings.insert(0, booking);
                true
            }
            None => false,
        }
    }

    // ---- concierge ----

    /// Ask the concierge for a recommendation over the catalog slice.
    /// Never fails; a collaborator failure arrives as its fallback string.
    pub async fn search(&mut self, query: &str) {
        if query.is_empty() {
            return;
        }
        self.thinking = true;
        self.concierge_message = None;
        let message = self.concierge.recommend(query, &self.catalog).await;
        self.concierge_message = Some(message);
        self.thinking = false;
    }
}
