//! identity_client - Identity provider collaborator contract and clients
//!
//! The flows never talk to the identity provider directly; they go through
//! the [`IdentityProvider`] trait so the provider can be swapped between
//! the REST client and the in-memory implementation used in tests and
//! local development.

pub mod error;
pub mod events;
pub mod memory;
pub mod provider;
pub mod rest;

// Re-export commonly used types
pub use error::{IdentityError, Result};
pub use events::{SessionEvent, SessionEvents};
pub use memory::InMemoryIdentity;
pub use provider::{
    FederatedProvider, IdentityProvider, SignInOutcome, SignUpOutcome, SignUpRequest,
};
pub use rest::RestIdentityClient;
