//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [rate] seq=0 payload=1.01
//! [temperature] seq=1 payload=25
//! [status] seq=2 payload="ready"
//! [heartbeat] seq=3
//! ```

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::events::{Event, Payload};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints one line per event for
/// debugging and demonstration purposes.
///
/// Not intended for production use — implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn notify(&self, e: &Event) -> Result<(), NotifyError> {
        match &e.payload {
            Payload::None => println!("[{}] seq={}", e.topic, e.seq),
            Payload::Float(v) => println!("[{}] seq={} payload={v}", e.topic, e.seq),
            Payload::Int(v) => println!("[{}] seq={} payload={v}", e.topic, e.seq),
            Payload::Text(v) => println!("[{}] seq={} payload={v:?}", e.topic, e.seq),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log-writer"
    }
}
