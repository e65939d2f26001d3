//! Step machine for the booking wizard.
//!
//! Small enough to live in one module: three steps, four events.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The visible step of one booking modal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    /// Collecting {date, time, notes}.
    Form,

    /// Read-only summary awaiting confirmation.
    Review,

    /// Terminal for this session; closing resets to a fresh Form.
    Success,
}

impl Default for BookingStep {
    fn default() -> Self {
        BookingStep::Form
    }
}

impl BookingStep {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Events fed to the booking step machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingFlowEvent {
    /// Form validated; show the review summary.
    ContinueRequested,
    /// Back from review, preserving entered values.
    BackRequested,
    /// Booking recorded.
    Confirmed,
    /// Modal closed; start the next session fresh.
    Closed,
}

/// Step machine for one booking modal session.
#[derive(Debug, Clone, Default)]
pub struct BookingMachine {
    current_step: BookingStep,
}

impl BookingMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> BookingStep {
        self.current_step
    }

    /// Handle an event; unmatched pairs stay on the current step.
    pub fn handle_event(&mut self, event: BookingFlowEvent) -> BookingStep {
        use BookingFlowEvent::*;
        use BookingStep::*;

        let next = match (self.current_step, event) {
            (Form, ContinueRequested) => Review,
            (Review, BackRequested) => Form,
            (Review, Confirmed) => Success,
            (_, Closed) => Form,
            _ => self.current_step,
        };

        if next != self.current_step {
            debug!(from = ?self.current_step, to = ?next, ?event, "booking step transition");
        }
        self.current_step = next;
        next
    }
}
