//! # Ordered registry of live subscribers.
//!
//! [`SubscriberRegistry`] holds the current subscriber handles in
//! registration order, with identity-based deduplication: two handles are the
//! same subscriber iff they point at the same underlying receiver
//! (`Arc::ptr_eq`).
//!
//! ## Rules
//! - **Idempotent subscribe**: registering a handle twice leaves one entry
//!   (no duplicate notifications).
//! - **Reported unsubscribe**: removing an unknown handle returns
//!   [`DispatchError::SubscriberNotFound`] so callers can detect stale
//!   references; the registry is unchanged.
//! - **Snapshot iteration**: [`snapshot`](SubscriberRegistry::snapshot)
//!   produces a point-in-time copy; concurrent subscribe/unsubscribe affects
//!   only later snapshots, never one already taken.
//!
//! The registry holds non-owning `Arc` handles; subscriber lifetime is
//! managed by whoever created the subscriber.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::DispatchError;
use crate::subscribers::{Subscribe, SubscriberRef};

/// Ordered, duplicate-free set of subscriber handles.
///
/// All mutation and snapshot reads go through one `RwLock` scoped to this
/// instance, which gives publish its point-in-time snapshot semantics.
#[derive(Default)]
pub struct SubscriberRegistry {
    subs: RwLock<Vec<SubscriberRef>>,
}

impl SubscriberRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            subs: RwLock::new(Vec::new()),
        }
    }

    /// Appends `handle` to the registration order unless already present.
    ///
    /// Returns `true` if the handle was added, `false` if it was already
    /// registered (the call is then a no-op).
    pub async fn subscribe(&self, handle: SubscriberRef) -> bool {
        let mut subs = self.subs.write().await;
        if subs.iter().any(|s| Arc::ptr_eq(s, &handle)) {
            return false;
        }
        subs.push(handle);
        true
    }

    /// Removes `handle` if present, preserving the order of the rest.
    ///
    /// Unknown handles yield [`DispatchError::SubscriberNotFound`]; the
    /// registry is left unchanged.
    pub async fn unsubscribe(&self, handle: &SubscriberRef) -> Result<(), DispatchError> {
        let mut subs = self.subs.write().await;
        match subs.iter().position(|s| Arc::ptr_eq(s, handle)) {
            Some(idx) => {
                subs.remove(idx);
                Ok(())
            }
            None => Err(DispatchError::SubscriberNotFound {
                name: handle.name().to_string(),
            }),
        }
    }

    /// Returns a point-in-time copy of the current subscribers, in
    /// registration order.
    ///
    /// Safe to iterate while the registry is mutated concurrently: the copy
    /// is taken under the lock, after which mutation affects only future
    /// snapshots.
    pub async fn snapshot(&self) -> Vec<SubscriberRef> {
        self.subs.read().await.clone()
    }

    /// Returns the number of registered subscribers.
    pub async fn len(&self) -> usize {
        self.subs.read().await.len()
    }

    /// Returns `true` if no subscribers are registered.
    pub async fn is_empty(&self) -> bool {
        self.subs.read().await.is_empty()
    }
}
