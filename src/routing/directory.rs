//! # Name-to-participant directory.
//!
//! [`Directory`] binds names to participant handles for the router. Lookup
//! is by name; join order is preserved because it determines broadcast
//! fan-out order.
//!
//! ## Rules
//! - **Unique names**: joining an already-bound name overwrites the prior
//!   binding (last-write-wins) and returns it, so callers can detect — and
//!   if they prefer, reject — the overwrite. The binding keeps its original
//!   position in join order.
//! - **Reported leave**: removing an unknown name returns
//!   [`DispatchError::ParticipantNotFound`]; the directory is unchanged.
//! - **Snapshot iteration**: [`snapshot`](Directory::snapshot) is a
//!   point-in-time copy, so routing is unaffected by concurrent join/leave.

use tokio::sync::RwLock;

use crate::error::DispatchError;
use crate::routing::ParticipantRef;

/// Join-ordered map of participant names to handles.
#[derive(Default)]
pub struct Directory {
    entries: RwLock<Vec<(String, ParticipantRef)>>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Binds `name` to `participant`.
    ///
    /// Returns the previous binding if `name` was already taken; the new
    /// binding keeps the old one's position in join order. `None` means the
    /// name was fresh and joined at the end.
    pub async fn join(&self, name: impl Into<String>, participant: ParticipantRef) -> Option<ParticipantRef> {
        let name = name.into();
        let mut entries = self.entries.write().await;
        match entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, participant)),
            None => {
                entries.push((name, participant));
                None
            }
        }
    }

    /// Removes the binding for `name` if present.
    ///
    /// Unknown names yield [`DispatchError::ParticipantNotFound`]; the
    /// directory is left unchanged.
    pub async fn leave(&self, name: &str) -> Result<(), DispatchError> {
        let mut entries = self.entries.write().await;
        match entries.iter().position(|(n, _)| n == name) {
            Some(idx) => {
                entries.remove(idx);
                Ok(())
            }
            None => Err(DispatchError::ParticipantNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Looks up the participant bound to `name`.
    pub async fn lookup(&self, name: &str) -> Option<ParticipantRef> {
        self.entries
            .read()
            .await
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.clone())
    }

    /// Returns `true` if `name` has a binding.
    pub async fn contains(&self, name: &str) -> bool {
        self.entries.read().await.iter().any(|(n, _)| n == name)
    }

    /// Returns a point-in-time copy of all bindings, in join order.
    pub async fn snapshot(&self) -> Vec<(String, ParticipantRef)> {
        self.entries.read().await.clone()
    }

    /// Returns the number of bindings.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if the directory holds no bindings.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::error::NotifyError;
    use crate::routing::{Message, Participant};

    struct Mailbox;

    #[async_trait]
    impl Participant for Mailbox {
        async fn receive(
            &self,
            _sender: &str,
            _message: &Message,
            _private: bool,
        ) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn join_and_lookup() {
        let dir = Directory::new();
        let nika: ParticipantRef = Arc::new(Mailbox);
        assert!(dir.join("Nika", Arc::clone(&nika)).await.is_none());

        let found = dir.lookup("Nika").await.unwrap();
        assert!(Arc::ptr_eq(&found, &nika));
        assert!(dir.lookup("Niusha").await.is_none());
    }

    #[tokio::test]
    async fn duplicate_join_overwrites_and_returns_previous() {
        let dir = Directory::new();
        let first: ParticipantRef = Arc::new(Mailbox);
        let second: ParticipantRef = Arc::new(Mailbox);
        dir.join("Nika", Arc::clone(&first)).await;
        dir.join("Zed", Arc::new(Mailbox) as ParticipantRef).await;

        let prev = dir.join("Nika", Arc::clone(&second)).await.unwrap();
        assert!(Arc::ptr_eq(&prev, &first));
        assert_eq!(dir.len().await, 2);

        // The rebinding keeps its original position in join order.
        let snap = dir.snapshot().await;
        assert_eq!(snap[0].0, "Nika");
        assert!(Arc::ptr_eq(&snap[0].1, &second));
    }

    #[tokio::test]
    async fn leave_unknown_is_reported() {
        let dir = Directory::new();
        dir.join("Nika", Arc::new(Mailbox) as ParticipantRef).await;

        let err = dir.leave("Niusha").await.unwrap_err();
        assert_eq!(err.as_label(), "participant_not_found");
        assert_eq!(dir.len().await, 1);

        assert!(dir.leave("Nika").await.is_ok());
        assert!(dir.is_empty().await);
    }

    #[tokio::test]
    async fn snapshot_preserves_join_order() {
        let dir = Directory::new();
        dir.join("a", Arc::new(Mailbox) as ParticipantRef).await;
        dir.join("b", Arc::new(Mailbox) as ParticipantRef).await;
        dir.join("c", Arc::new(Mailbox) as ParticipantRef).await;

        let names: Vec<_> = dir.snapshot().await.into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
