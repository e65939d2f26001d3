//! Step machine for the authentication wizard.

mod events;
mod states;
mod transitions;

pub use events::AuthFlowEvent;
pub use states::AuthStep;
pub use transitions::{AuthMachine, StepTransition};
