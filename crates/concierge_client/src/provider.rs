//! The recommendation collaborator contract.

use async_trait::async_trait;
use booking_core::ServiceItem;

/// Shown when no API credential is configured.
pub const FALLBACK_NO_API_KEY: &str =
    "I can't provide AI recommendations without an API key, but feel free to browse our catalog!";

/// Shown when the model returns an empty completion.
pub const FALLBACK_NO_MATCH: &str =
    "I couldn't find a perfect match, but please explore our catalog below.";

/// Shown on any transport or API failure.
pub const FALLBACK_UNAVAILABLE: &str =
    "Our digital concierge is momentarily unavailable. Please browse the categories below.";

/// Contract consumed by the application shell's search.
///
/// Infallible by signature: implementations absorb every failure and
/// return a fallback string instead.
#[async_trait]
pub trait ConciergeProvider: Send + Sync {
    async fn recommend(&self, query: &str, services: &[ServiceItem]) -> String;
}

/// Fixed-answer concierge for tests and offline demos.
pub struct CannedConcierge {
    answer: String,
}

impl CannedConcierge {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

#[async_trait]
impl ConciergeProvider for CannedConcierge {
    async fn recommend(&self, _query: &str, _services: &[ServiceItem]) -> String {
        self.answer.clone()
    }
}
