//! Session-change notifications from the identity provider.
//!
//! The application shell subscribes to these to react to sign-ins and
//! sign-outs that happen outside its own calls (external sign-out, a
//! federated flow completing in another window).

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
}

/// Broadcast hub for session events.
///
/// Cheap to clone; every provider implementation holds one and emits on
/// session changes. Emitting with no live subscribers is fine.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: SessionEvent) {
        // A send error only means nobody is listening right now.
        let _ = self.sender.send(event);
    }
}
