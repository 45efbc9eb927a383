//! # Messages delivered through the router.
//!
//! A [`Message`] is an immutable value: created by the sender, never mutated
//! after construction, discarded once delivery completes. Who sent it and
//! whether it was private travel alongside it as arguments of
//! [`Participant::receive`](crate::Participant::receive), not inside the
//! message itself.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// Immutable routed message.
///
/// `Clone` shares the body buffer (immutable) and copies the timestamp.
#[derive(Debug, Clone)]
pub struct Message {
    /// Message text.
    pub body: Arc<str>,
    /// Wall-clock timestamp of construction.
    pub at: SystemTime,
}

impl Message {
    /// Creates a message with the given body and the current timestamp.
    pub fn new(body: impl Into<Arc<str>>) -> Self {
        Self {
            body: body.into(),
            at: SystemTime::now(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}
