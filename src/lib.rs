//! # dispatchkit
//!
//! **Dispatchkit** is a small in-process dispatch library for Rust.
//!
//! It provides three composable subsystems that share no mutable state and
//! are wired together by client code:
//!
//! 1. **Event broadcasting** — a live subscriber registry plus a broadcaster
//!    that delivers typed events to every registered subscriber with
//!    partial-failure isolation.
//! 2. **Reversible commands** — an invoker that executes do/undo operations
//!    through a bounded LIFO history.
//! 3. **Message routing** — a directory of named participants and a router
//!    for private or broadcast delivery.
//!
//! ## Architecture
//! ```text
//!  producer                        consumer code
//!     │                                 ▲
//!     ▼                                 │
//! ┌───────────────────────────────────────────────────────────┐
//! │ Broadcaster                                               │
//! │   ├─ SubscriberRegistry (ordered, idempotent, snapshot)   │
//! │   └─ publish(Event) ──► task per subscriber ──► notify()  │
//! │                              └─► PublishReport            │
//! ├───────────────────────────────────────────────────────────┤
//! │ Invoker                                                   │
//! │   ├─ execute(Command) ── apply() ok ──► push history      │
//! │   └─ undo_last() ── pop ──► revert()                      │
//! ├───────────────────────────────────────────────────────────┤
//! │ Router                                                    │
//! │   ├─ Directory (name → participant, join order)           │
//! │   └─ route(sender, msg, recipient?) ──► receive()         │
//! │                              └─► RouteReceipt             │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Delivery guarantees
//! - `publish`/`route` snapshot their target set at call time: a concurrent
//!   subscribe/unsubscribe or join/leave affects only subsequent calls,
//!   never the in-flight one.
//! - Deliveries are dispatched independently (one task per target) and
//!   collected with a bounded join, so a slow or failing target never blocks
//!   the others. Panics are caught and reported.
//! - Failures are never swallowed: they come back in the
//!   [`PublishReport`] / [`RouteReceipt`]. The core itself never logs.
//!
//! ## Features
//! | Area           | Description                                               | Key types / traits                      |
//! |----------------|-----------------------------------------------------------|-----------------------------------------|
//! | **Events**     | Broadcast typed events to a dynamic subscriber set.       | [`Broadcaster`], [`Event`], [`Subscribe`] |
//! | **Commands**   | Execute reversible operations; undo the most recent.      | [`Invoker`], [`Command`], [`CommandFn`] |
//! | **Routing**    | Deliver messages privately or to all other participants.  | [`Router`], [`Participant`], [`Message`] |
//! | **Errors**     | Structured, recoverable outcomes for every failure path.  | [`DispatchError`], [`InvokerError`], [`DeliveryError`] |
//! | **Configuration** | Per-instance delivery timeout and history bound.       | [`Config`]                              |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] subscriber
//!   _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use async_trait::async_trait;
//! use dispatchkit::{Broadcaster, Config, Event, NotifyError, Subscribe, SubscriberRef};
//!
//! struct Display {
//!     last: Mutex<Option<f64>>,
//! }
//!
//! #[async_trait]
//! impl Subscribe for Display {
//!     async fn notify(&self, event: &Event) -> Result<(), NotifyError> {
//!         *self.last.lock().unwrap() = event.as_float();
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "display"
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let broadcaster = Broadcaster::new(Config::default());
//!     let display = Arc::new(Display { last: Mutex::new(None) });
//!     broadcaster.subscribe(display.clone() as SubscriberRef).await;
//!
//!     let report = broadcaster.publish(Event::new("rate").with_float(1.0100)).await;
//!     assert!(report.all_delivered());
//!     assert_eq!(*display.last.lock().unwrap(), Some(1.0100));
//! }
//! ```

mod commands;
mod config;
mod error;
mod events;
mod routing;
mod subscribers;

// ---- Public re-exports ----

pub use commands::{Command, CommandFn, CommandRef, Invoker, UndoOutcome};
pub use config::Config;
pub use error::{
    CommandError, DeliveryError, DeliveryFailure, DispatchError, InvokerError, NotifyError,
};
pub use events::{Broadcaster, Event, Payload, PublishReport, SubscriberRegistry};
pub use routing::{Directory, Message, Participant, ParticipantRef, RouteReceipt, Router};
pub use subscribers::{Subscribe, SubscriberRef};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
