//! # Dispatch core configuration.
//!
//! Provides [`Config`] — the instantiation parameters for the broadcaster,
//! router, and invoker. There is no global configuration store: the top-level
//! composition point constructs a `Config` and passes it to whichever
//! component needs it.
//!
//! ## Sentinel values
//! - `delivery_timeout = 0s` → no per-delivery timeout
//! - `history_capacity = 0` → unbounded undo history

use std::time::Duration;

/// Configuration for the dispatch core.
///
/// Defines:
/// - **Delivery bounding**: optional per-delivery timeout for fan-out
/// - **History bounding**: capacity of the invoker's undo stack
///
/// ## Field semantics
/// - `delivery_timeout`: upper bound on a single subscriber/participant
///   delivery (`0s` = unbounded)
/// - `history_capacity`: max number of executed commands retained for undo
///   (`0` = unbounded; on overflow the **oldest** entry is dropped)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time one delivery (subscriber notify / participant receive)
    /// may take before it is reported as timed out.
    ///
    /// - `Duration::ZERO` = no timeout (delivery awaited to completion)
    /// - `> 0` = delivery cancelled after this long and reported as
    ///   [`DeliveryError::TimedOut`](crate::DeliveryError::TimedOut)
    ///
    /// A timed-out delivery counts as a failure in the report; the remaining
    /// deliveries are unaffected.
    pub delivery_timeout: Duration,

    /// Capacity of the invoker's undo history.
    ///
    /// - `0` = unbounded
    /// - `n > 0` = at most `n` executed commands are retained; executing
    ///   beyond the cap silently drops the oldest entry (undo never reaches
    ///   past the cap, and dropping the newest would break LIFO order)
    pub history_capacity: usize,
}

impl Config {
    /// Returns the per-delivery timeout as an `Option`.
    ///
    /// - `None` → no timeout
    /// - `Some(d)` → each delivery is bounded by `d`
    #[inline]
    pub fn delivery_deadline(&self) -> Option<Duration> {
        if self.delivery_timeout == Duration::ZERO {
            None
        } else {
            Some(self.delivery_timeout)
        }
    }

    /// Returns the history capacity as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` entries retained
    #[inline]
    pub fn history_limit(&self) -> Option<usize> {
        if self.history_capacity == 0 {
            None
        } else {
            Some(self.history_capacity)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `delivery_timeout = 0s` (unbounded; in-process handlers are assumed
    ///   to complete in bounded time — set a timeout for production use)
    /// - `history_capacity = 1024` (generous undo depth, bounded memory)
    fn default() -> Self {
        Self {
            delivery_timeout: Duration::ZERO,
            history_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_means_unbounded() {
        let cfg = Config {
            delivery_timeout: Duration::ZERO,
            ..Config::default()
        };
        assert_eq!(cfg.delivery_deadline(), None);

        let cfg = Config {
            delivery_timeout: Duration::from_millis(50),
            ..Config::default()
        };
        assert_eq!(cfg.delivery_deadline(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn zero_capacity_means_unbounded() {
        let cfg = Config {
            history_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.history_limit(), None);

        let cfg = Config {
            history_capacity: 8,
            ..Config::default()
        };
        assert_eq!(cfg.history_limit(), Some(8));
    }
}
