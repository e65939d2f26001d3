//! concierge_client - Generative recommendation collaborator
//!
//! The concierge answers a free-text guest query with a short
//! recommendation drawn from the service catalog. The hard contract:
//! `recommend` never fails. Missing credentials, transport failures and
//! empty completions all degrade to a fixed fallback string.

pub mod gemini;
pub mod provider;

// Re-export commonly used types
pub use gemini::GeminiConcierge;
pub use provider::{
    CannedConcierge, ConciergeProvider, FALLBACK_NO_API_KEY, FALLBACK_NO_MATCH,
    FALLBACK_UNAVAILABLE,
};
