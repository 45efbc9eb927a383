//! # Subscriber capability and built-in implementations.
//!
//! This module provides the [`Subscribe`] trait — the single-method
//! capability through which the broadcaster delivers events — and a built-in
//! stdout [`LogWriter`] for demos (feature `logging`).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   producer ── publish(Event) ──► Broadcaster ──► snapshot of registry
//!                                       │
//!                                       ├──► Subscribe::notify(&Event)
//!                                       │         │
//!                                       │    ┌────┴──────┬──────────┐
//!                                       │    ▼           ▼          ▼
//!                                       │  LogWriter  ThresholdAlert  ...
//!                                       │
//!                                       └──► PublishReport (failures collected)
//! ```
//!
//! ## Implementing custom subscribers
//! ```rust
//! use async_trait::async_trait;
//! use dispatchkit::{Event, NotifyError, Subscribe};
//!
//! struct RateAlert {
//!     threshold: f64,
//! }
//!
//! #[async_trait]
//! impl Subscribe for RateAlert {
//!     async fn notify(&self, event: &Event) -> Result<(), NotifyError> {
//!         if let Some(rate) = event.as_float() {
//!             if rate > self.threshold {
//!                 // raise an alert, export a metric, etc.
//!             }
//!         }
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "rate-alert"
//!     }
//! }
//! ```
//!
//! Whether a subscriber reacts to a given event (e.g. only above a threshold)
//! is entirely its own decision; the broadcaster has no knowledge of it.

mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use subscriber::{Subscribe, SubscriberRef};

#[cfg(feature = "logging")]
pub use log::LogWriter;
