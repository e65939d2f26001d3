//! auth_flow - Authentication flow state machine and controller
//!
//! This crate drives the sign-in / sign-up / confirmation wizard against
//! an [`identity_client::IdentityProvider`]. The step machine itself is
//! pure; all collaborator calls live in the controller.

pub mod controller;
pub mod machine;

// Re-export commonly used types
pub use controller::{AuthFlowController, AuthFlowOutcome, AuthForm};
pub use machine::{AuthFlowEvent, AuthMachine, AuthStep, StepTransition};
