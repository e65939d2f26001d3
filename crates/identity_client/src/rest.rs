//! REST-backed identity client.
//!
//! Talks to a JSON identity API and maps its wire error codes onto
//! [`IdentityError`]. Base URL is injectable for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use booking_core::{UserProfile, UserRole};
use reqwest::{Client, Response};
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::{IdentityError, Result};
use crate::events::{SessionEvent, SessionEvents};
use crate::provider::{
    FederatedProvider, IdentityProvider, SignInOutcome, SignUpOutcome, SignUpRequest,
};

pub struct RestIdentityClient {
    client: Client,
    base_url: String,
    events: SessionEvents,
}

#[derive(Debug, Deserialize)]
struct OutcomeResponse {
    outcome: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    username: String,
    #[serde(default)]
    attributes: HashMap<String, String>,
}

impl RestIdentityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            events: SessionEvents::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into a taxonomy error, keeping the
    /// provider-supplied message for the catch-all.
    async fn error_from(response: Response) -> IdentityError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(body) => IdentityError::from_code(&body.code, body.message),
            Err(_) => {
                warn!(%status, "identity provider returned an unrecognised error body");
                IdentityError::Provider(format!("HTTP {}: {}", status, text))
            }
        }
    }

    fn profile_from(me: MeResponse) -> UserProfile {
        let email = me
            .attributes
            .get("email")
            .cloned()
            .unwrap_or_else(|| me.username.clone());
        let display_name = me
            .attributes
            .get("name")
            .cloned()
            .unwrap_or(me.username);
        UserProfile {
            email,
            display_name,
            role: UserRole::from_attribute(me.attributes.get("custom:role").map(String::as_str)),
            bio: me.attributes.get("custom:bio").cloned(),
            avatar: None,
        }
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInOutcome> {
        let response = self
            .client
            .post(self.url("/sign-in"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body: OutcomeResponse = response.json().await?;
        match body.outcome.as_str() {
            "completed" => {
                debug!(email, "sign-in completed");
                self.events.emit(SessionEvent::SignedIn);
                Ok(SignInOutcome::Completed)
            }
            "confirmation_required" => Ok(SignInOutcome::ConfirmationRequired),
            other => Err(IdentityError::Provider(format!(
                "unexpected sign-in outcome: {}",
                other
            ))),
        }
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpOutcome> {
        let response = self
            .client
            .post(self.url("/sign-up"))
            .json(&serde_json::json!({
                "email": request.email,
                "password": request.password,
                "name": request.display_name,
                // The role travels as a custom profile attribute.
                "attributes": { "custom:role": request.role.as_attribute() },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body: OutcomeResponse = response.json().await?;
        match body.outcome.as_str() {
            "confirmation_required" => Ok(SignUpOutcome::ConfirmationRequired),
            "auto_signed_in" => {
                self.events.emit(SessionEvent::SignedIn);
                Ok(SignUpOutcome::AutoSignedIn)
            }
            other => Err(IdentityError::Provider(format!(
                "unexpected sign-up outcome: {}",
                other
            ))),
        }
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/confirm"))
            .json(&serde_json::json!({ "email": email, "code": code }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<UserProfile> {
        let response = self.client.get(self.url("/me")).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let me: MeResponse = response.json().await?;
        Ok(Self::profile_from(me))
    }

    async fn sign_out(&self) -> Result<()> {
        let response = self.client.post(self.url("/sign-out")).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        self.events.emit(SessionEvent::SignedOut);
        Ok(())
    }

    async fn federated_sign_in(&self, provider: FederatedProvider) -> Result<()> {
        let response = self
            .client
            .post(self.url("/federated"))
            .json(&serde_json::json!({ "provider": provider }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        // Completion arrives later as a session event; nothing to do here.
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
