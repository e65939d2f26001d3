//! booking_flow - Booking flow state machine and controller
//!
//! Drives the form / review / success wizard for one service booking.
//! Unlike the auth flow there is no network collaborator: confirming is
//! a purely local ledger append performed by the shell with the Booking
//! this crate constructs.

pub mod controller;
pub mod machine;

// Re-export commonly used types
pub use controller::{BookingFlowController, BookingForm};
pub use machine::{BookingFlowEvent, BookingMachine, BookingStep};
