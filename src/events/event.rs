//! # Events delivered through the broadcaster.
//!
//! An [`Event`] is an immutable value carrying a topic name and a typed
//! [`Payload`]. It is created by the publisher, never mutated after
//! construction, and discarded once delivery completes.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically across the process. Use `seq` to restore publish order when
//! events are observed out of order (subscribers run independently).
//!
//! ## Example
//! ```rust
//! use dispatchkit::{Event, Payload};
//!
//! let ev = Event::new("rate").with_float(1.0100);
//!
//! assert_eq!(&*ev.topic, "rate");
//! assert_eq!(ev.as_float(), Some(1.0100));
//! assert_eq!(ev.payload, Payload::Float(1.0100));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Typed event payload.
///
/// Covers the scalar shapes producers actually publish (a rate, a
/// temperature, a status string). Structured payloads can be carried as
/// [`Payload::Text`] in whatever encoding the producer and its subscribers
/// agree on; the broadcaster never inspects payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No payload; the topic itself is the signal.
    None,
    /// A floating-point value (e.g. an exchange rate).
    Float(f64),
    /// An integer value (e.g. a temperature in whole degrees).
    Int(i64),
    /// A text value. Shared, immutable buffer — cloning an event shares it.
    Text(Arc<str>),
}

/// Immutable event with topic, payload, and ordering metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - `topic` / `payload`: what happened and the value attached to it
///
/// `Clone` produces a structurally independent event value; the `topic` and
/// any `Payload::Text` buffer are shared immutable allocations, everything
/// else is copied.
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Topic name (e.g. `"rate"`, `"temperature"`).
    pub topic: Arc<str>,
    /// Value attached to this event.
    pub payload: Payload,
}

impl Event {
    /// Creates a new event on the given topic with no payload, the current
    /// timestamp, and the next global sequence number.
    pub fn new(topic: impl Into<Arc<str>>) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            topic: topic.into(),
            payload: Payload::None,
        }
    }

    /// Attaches a floating-point payload.
    #[inline]
    pub fn with_float(mut self, value: f64) -> Self {
        self.payload = Payload::Float(value);
        self
    }

    /// Attaches an integer payload.
    #[inline]
    pub fn with_int(mut self, value: i64) -> Self {
        self.payload = Payload::Int(value);
        self
    }

    /// Attaches a text payload.
    #[inline]
    pub fn with_text(mut self, value: impl Into<Arc<str>>) -> Self {
        self.payload = Payload::Text(value.into());
        self
    }

    /// Returns the payload as `f64` if it is [`Payload::Float`].
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self.payload {
            Payload::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the payload as `i64` if it is [`Payload::Int`].
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self.payload {
            Payload::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the payload as `&str` if it is [`Payload::Text`].
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(v) => Some(v),
            _ => None,
        }
    }
}
