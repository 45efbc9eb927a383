//! # Participant capability.
//!
//! Provides [`Participant`] — the single-method mailbox through which the
//! router delivers messages. Names are not part of the capability: a
//! participant is named by the binding it holds in the
//! [`Directory`](crate::Directory), so the same participant object can in
//! principle be bound under several names.
//!
//! Deliveries run under the same isolation rules as event broadcasts: an
//! error or panic in `receive` is collected into the route receipt without
//! affecting other recipients.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::routing::Message;

/// Shared handle to a participant.
///
/// The directory holds these as non-owning references; the participant's
/// lifetime is managed by its creator.
pub type ParticipantRef = Arc<dyn Participant>;

/// Mailbox capability for routed messages.
#[async_trait]
pub trait Participant: Send + Sync + 'static {
    /// Receives one message.
    ///
    /// - `sender`: directory name of the sending participant.
    /// - `private` is `true` when the message was addressed to this
    ///   participant alone, `false` for a broadcast.
    ///
    /// Returning an error marks this delivery failed in the route receipt;
    /// other recipients are unaffected.
    async fn receive(
        &self,
        sender: &str,
        message: &Message,
        private: bool,
    ) -> Result<(), NotifyError>;
}
