//! # Event subscriber trait.
//!
//! Provides [`Subscribe`] — the extension point for plugging event consumers
//! into the broadcaster.
//!
//! Each delivery runs in its own task under the broadcaster's isolation
//! rules:
//! - an error returned from [`notify`](Subscribe::notify) is collected into
//!   the publish report without affecting other subscribers;
//! - a panic is caught and reported the same way;
//! - the configured per-delivery timeout bounds a slow `notify`.
//!
//! ## Rules
//! - Subscribers are compared by identity: the same `Arc` handle is the same
//!   subscriber, regardless of type.
//! - Use async I/O inside `notify`; avoid blocking the executor.
//! - Handle recoverable conditions internally and return [`NotifyError`]
//!   only when the delivery genuinely failed — it shows up in the caller's
//!   report.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::events::Event;

/// Shared handle to a subscriber.
///
/// The registry holds these as non-owning references; the subscriber's
/// lifetime is managed by its creator. Identity-based equality
/// (`Arc::ptr_eq`) decides whether two handles are the same subscriber.
pub type SubscriberRef = Arc<dyn Subscribe>;

/// Event consumer capability.
///
/// A single-method interface: distinct behaviors (plain display, threshold
/// alert, logger) are distinct implementations selected at construction
/// time.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated delivery task, not in the publisher's context.
    /// Returning an error marks this delivery failed in the publish report;
    /// other subscribers are unaffected.
    async fn notify(&self, event: &Event) -> Result<(), NotifyError>;

    /// Returns the subscriber name used in delivery reports.
    ///
    /// Prefer short, descriptive names (e.g. "mobile-app", "alert"). The
    /// default uses `type_name::<Self>()`, which can be verbose — override
    /// it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
