//! Event broadcasting: data model, subscriber registry, and fan-out.
//!
//! This module groups the event **data model**, the **registry** of live
//! subscribers, and the **broadcaster** that fans an event out to every
//! registered subscriber with partial-failure isolation.
//!
//! ## Contents
//! - [`Event`], [`Payload`] — immutable topic + payload values
//! - [`SubscriberRegistry`] — ordered, duplicate-free set of subscriber handles
//! - [`Broadcaster`], [`PublishReport`] — snapshot-based fan-out and its outcome
//!
//! ## Quick reference
//! - **Producers** call [`Broadcaster::publish`]; delivery targets are
//!   snapshotted at call time.
//! - **Consumers** implement [`Subscribe`](crate::Subscribe) and are held by
//!   the registry as non-owning `Arc` handles.

mod broadcaster;
mod event;
mod registry;

pub use broadcaster::{Broadcaster, PublishReport};
pub use event::{Event, Payload};
pub use registry::SubscriberRegistry;
