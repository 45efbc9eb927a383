//! Message routing: named participants, the directory, and the router.
//!
//! This module groups the message **data model**, the **directory** of named
//! participants, and the **router** that delivers a message either privately
//! to one named recipient or as a broadcast to everyone except the sender.
//!
//! ## Contents
//! - [`Message`] — immutable message value
//! - [`Participant`], [`ParticipantRef`] — the mailbox capability
//! - [`Directory`] — name-to-participant bindings, join order preserved
//! - [`Router`], [`RouteReceipt`] — snapshot-based delivery and its outcome
//!
//! ## Quick reference
//! - **Senders** must have joined the directory before routing; an unknown
//!   sender gets [`DispatchError::SenderNotRegistered`](crate::DispatchError).
//! - **Private delivery** is flagged to the recipient via the `private`
//!   argument of [`Participant::receive`].

mod directory;
mod message;
mod participant;
mod router;

pub use directory::Directory;
pub use message::Message;
pub use participant::{Participant, ParticipantRef};
pub use router::{RouteReceipt, Router};
