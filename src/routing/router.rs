//! # Message routing with private and broadcast delivery.
//!
//! [`Router`] delivers a message from one named participant either to one
//! named recipient (private) or to every other participant in the directory
//! (broadcast).
//!
//! ## Architecture
//! ```text
//! route(sender, message, recipient?)
//!     │
//!     ├─ directory.snapshot()               (point-in-time bindings)
//!     ├─ sender bound? ──no──► Err(SenderNotRegistered)
//!     │
//!     ├─ recipient given:
//!     │     ├─ found ──► recipient.receive(sender, msg, private=true)
//!     │     └─ missing ──► Err(RecipientNotFound)
//!     │
//!     └─ no recipient:
//!           ├──► task per participant except sender, in join order
//!           │        └──► p.receive(sender, msg, private=false)
//!           └─ bounded join ──► RouteReceipt { attempted, failures }
//! ```
//!
//! ## Rules
//! - **Snapshot semantics**: join/leave racing with `route` affects only
//!   subsequent routes, never the in-flight one.
//! - **The sender never receives its own broadcast.**
//! - **Isolation**: a failing, panicking, or slow recipient is reported in
//!   the receipt and never blocks the others; the per-delivery timeout from
//!   [`Config`] applies to each delivery.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::{guard_delivery, DeliveryError, DeliveryFailure, DispatchError};
use crate::routing::directory::Directory;
use crate::routing::message::Message;
use crate::routing::participant::{Participant, ParticipantRef};

/// Outcome of one route call.
///
/// Failures are listed in join order. For a private route, `attempted` is 1.
#[derive(Debug, Default)]
pub struct RouteReceipt {
    /// Number of recipients in the snapshot (delivery was attempted to each).
    pub attempted: usize,
    /// Recipients that did not receive the message, with the reason.
    pub failures: Vec<DeliveryFailure>,
    /// `true` if this was a directly-addressed (private) delivery.
    pub private: bool,
}

impl RouteReceipt {
    /// Number of successful deliveries.
    pub fn delivered(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// Returns `true` if every recipient received the message.
    pub fn all_delivered(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Snapshot-based message delivery over a [`Directory`].
///
/// Owns its directory; participants themselves are referenced, never owned.
pub struct Router {
    directory: Directory,
    cfg: Config,
}

impl Router {
    /// Creates a router with an empty directory.
    pub fn new(cfg: Config) -> Self {
        Self {
            directory: Directory::new(),
            cfg,
        }
    }

    /// Access to the underlying directory (join/leave/lookup).
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Binds `name` in the directory (see [`Directory::join`]).
    pub async fn join(
        &self,
        name: impl Into<String>,
        participant: ParticipantRef,
    ) -> Option<ParticipantRef> {
        self.directory.join(name, participant).await
    }

    /// Removes `name` from the directory (see [`Directory::leave`]).
    pub async fn leave(&self, name: &str) -> Result<(), DispatchError> {
        self.directory.leave(name).await
    }

    /// Routes `message` from `sender`.
    ///
    /// With `recipient` set, delivers privately to that one participant;
    /// otherwise broadcasts to every participant except the sender, in join
    /// order. The directory is snapshotted at call time.
    ///
    /// Errors (all non-fatal, no delivery performed):
    /// - [`DispatchError::SenderNotRegistered`] — `sender` has no binding;
    /// - [`DispatchError::RecipientNotFound`] — `recipient` has no binding.
    pub async fn route(
        &self,
        sender: &str,
        message: Message,
        recipient: Option<&str>,
    ) -> Result<RouteReceipt, DispatchError> {
        let bindings = self.directory.snapshot().await;
        if !bindings.iter().any(|(name, _)| name == sender) {
            return Err(DispatchError::SenderNotRegistered {
                name: sender.to_string(),
            });
        }

        match recipient {
            Some(target) => {
                let Some((name, participant)) =
                    bindings.into_iter().find(|(name, _)| name == target)
                else {
                    return Err(DispatchError::RecipientNotFound {
                        name: target.to_string(),
                    });
                };
                self.deliver_private(sender, message, name, participant).await
            }
            None => self.deliver_broadcast(sender, message, bindings).await,
        }
    }

    /// Delivers to exactly one participant, flagged private.
    async fn deliver_private(
        &self,
        sender: &str,
        message: Message,
        name: String,
        participant: ParticipantRef,
    ) -> Result<RouteReceipt, DispatchError> {
        let deadline = self.cfg.delivery_deadline();
        let outcome = guard_delivery(participant.receive(sender, &message, true), deadline).await;

        let failures = match outcome {
            Ok(()) => Vec::new(),
            Err(error) => vec![DeliveryFailure { name, error }],
        };
        Ok(RouteReceipt {
            attempted: 1,
            failures,
            private: true,
        })
    }

    /// Delivers to every participant except the sender, in join order.
    async fn deliver_broadcast(
        &self,
        sender: &str,
        message: Message,
        bindings: Vec<(String, ParticipantRef)>,
    ) -> Result<RouteReceipt, DispatchError> {
        let deadline = self.cfg.delivery_deadline();
        let message = Arc::new(message);
        let sender: Arc<str> = Arc::from(sender);

        let mut set = JoinSet::new();
        let mut attempted = 0usize;
        for (idx, (name, participant)) in bindings.into_iter().enumerate() {
            if name.as_str() == &*sender {
                continue;
            }
            attempted += 1;
            let msg = Arc::clone(&message);
            let from = Arc::clone(&sender);
            set.spawn(async move {
                let outcome =
                    guard_delivery(participant.receive(&from, &msg, false), deadline).await;
                (idx, name, outcome)
            });
        }

        let mut failed: Vec<(usize, String, DeliveryError)> = Vec::new();
        while let Some(joined) = set.join_next().await {
            // Delivery tasks cannot panic (guard_delivery catches) and are
            // never aborted; a JoinError would mean runtime shutdown.
            if let Ok((idx, name, outcome)) = joined {
                if let Err(error) = outcome {
                    failed.push((idx, name, error));
                }
            }
        }
        failed.sort_by_key(|(idx, _, _)| *idx);

        Ok(RouteReceipt {
            attempted,
            failures: failed
                .into_iter()
                .map(|(_, name, error)| DeliveryFailure { name, error })
                .collect(),
            private: false,
        })
    }
}
