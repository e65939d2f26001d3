//! app_shell - Coordinator for session state, the booking ledger and the
//! two flow controllers
//!
//! The shell is glue: it owns the only mutable session state (AuthSession,
//! the ledger, the concierge result, the active modal) and dispatches
//! UI-shaped events to the controllers. It carries no business logic of
//! its own.

pub mod shell;

// Re-export commonly used types
pub use shell::{ActiveModal, AppShell};
