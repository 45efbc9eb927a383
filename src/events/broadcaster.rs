//! # Event fan-out with partial-failure isolation.
//!
//! [`Broadcaster`] delivers one event to every subscriber registered at the
//! moment [`publish`](Broadcaster::publish) is called.
//!
//! ## Architecture
//! ```text
//! publish(event)
//!     │
//!     ├─ registry.snapshot()            (point-in-time target set)
//!     │
//!     ├──► task 1 ──► subscriber1.notify()
//!     │        └────► panic caught, timeout enforced
//!     ├──► task 2 ──► subscriber2.notify()
//!     └──► task N ──► subscriberN.notify()
//!     │
//!     └─ bounded join ──► PublishReport { attempted, failures }
//! ```
//!
//! ## Rules
//! - **Snapshot semantics**: a subscribe/unsubscribe racing with `publish`
//!   affects only subsequent broadcasts, never the in-flight one.
//! - **Isolation**: one delivery task per subscriber, spawned in registration
//!   order; a slow, failing, or panicking subscriber never blocks the others.
//! - **Nothing swallowed**: every failed delivery appears in the returned
//!   [`PublishReport`], in registration order. The broadcaster itself never
//!   logs.
//! - **Bounded join**: `publish` returns once every delivery has completed,
//!   failed, or hit the configured per-delivery timeout.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::{guard_delivery, DeliveryError, DeliveryFailure};
use crate::events::event::Event;
use crate::events::registry::SubscriberRegistry;
use crate::subscribers::{Subscribe, SubscriberRef};

/// Outcome of one broadcast.
///
/// Failures are listed in registration order. An empty `failures` means every
/// snapshotted subscriber received the event.
#[derive(Debug, Default)]
pub struct PublishReport {
    /// Number of subscribers in the snapshot (delivery was attempted to each).
    pub attempted: usize,
    /// Subscribers that did not receive the event, with the reason.
    pub failures: Vec<DeliveryFailure>,
}

impl PublishReport {
    /// Number of successful deliveries.
    pub fn delivered(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// Returns `true` if every snapshotted subscriber received the event.
    pub fn all_delivered(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Snapshot-based event fan-out over a [`SubscriberRegistry`].
///
/// Owns its registry; subscribers themselves are referenced, never owned.
pub struct Broadcaster {
    registry: SubscriberRegistry,
    cfg: Config,
}

impl Broadcaster {
    /// Creates a broadcaster with an empty registry.
    pub fn new(cfg: Config) -> Self {
        Self {
            registry: SubscriberRegistry::new(),
            cfg,
        }
    }

    /// Access to the underlying registry (subscribe/unsubscribe/snapshot).
    pub fn registry(&self) -> &SubscriberRegistry {
        &self.registry
    }

    /// Registers a subscriber; idempotent (see [`SubscriberRegistry::subscribe`]).
    pub async fn subscribe(&self, handle: SubscriberRef) -> bool {
        self.registry.subscribe(handle).await
    }

    /// Removes a subscriber (see [`SubscriberRegistry::unsubscribe`]).
    pub async fn unsubscribe(
        &self,
        handle: &SubscriberRef,
    ) -> Result<(), crate::error::DispatchError> {
        self.registry.unsubscribe(handle).await
    }

    /// Delivers `event` to every currently registered subscriber.
    ///
    /// The target set is snapshotted at call time. One delivery task is
    /// spawned per subscriber, in registration order; panics are caught and
    /// the configured per-delivery timeout is enforced per task. The call
    /// returns after all deliveries settle, reporting any failures.
    pub async fn publish(&self, event: Event) -> PublishReport {
        let targets = self.registry.snapshot().await;
        let attempted = targets.len();
        if attempted == 0 {
            return PublishReport::default();
        }

        let event = Arc::new(event);
        let deadline = self.cfg.delivery_deadline();

        let mut set = JoinSet::new();
        for (idx, sub) in targets.into_iter().enumerate() {
            let ev = Arc::clone(&event);
            set.spawn(async move {
                let outcome = guard_delivery(sub.notify(&ev), deadline).await;
                (idx, sub.name().to_string(), outcome)
            });
        }

        let mut slots: Vec<Option<(String, DeliveryError)>> = Vec::new();
        slots.resize_with(attempted, || None);
        let mut failed = 0usize;
        while let Some(joined) = set.join_next().await {
            // Delivery tasks cannot panic (guard_delivery catches), and
            // nothing aborts them; a JoinError here would mean runtime
            // shutdown, in which case the delivery is simply not reported.
            if let Ok((idx, name, outcome)) = joined {
                if let Err(error) = outcome {
                    slots[idx] = Some((name, error));
                    failed += 1;
                }
            }
        }

        let mut failures = Vec::with_capacity(failed);
        for slot in slots {
            if let Some((name, error)) = slot {
                failures.push(DeliveryFailure { name, error });
            }
        }
        PublishReport { attempted, failures }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::NotifyError;
    use crate::subscribers::Subscribe;

    /// Records every float payload it sees.
    struct Recorder {
        label: &'static str,
        seen: Mutex<Vec<f64>>,
    }

    impl Recorder {
        fn arc(label: &'static str) -> Arc<Self> {
            Arc::new(Self {
                label,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<f64> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn notify(&self, event: &Event) -> Result<(), NotifyError> {
            if let Some(rate) = event.as_float() {
                self.seen.lock().unwrap().push(rate);
            }
            Ok(())
        }

        fn name(&self) -> &str {
            self.label
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl Subscribe for AlwaysFails {
        async fn notify(&self, _event: &Event) -> Result<(), NotifyError> {
            Err(NotifyError::failed("subscriber refused"))
        }

        fn name(&self) -> &str {
            "always-fails"
        }
    }

    struct Panics;

    #[async_trait]
    impl Subscribe for Panics {
        async fn notify(&self, _event: &Event) -> Result<(), NotifyError> {
            panic!("subscriber bug");
        }

        fn name(&self) -> &str {
            "panics"
        }
    }

    struct Slow;

    #[async_trait]
    impl Subscribe for Slow {
        async fn notify(&self, _event: &Event) -> Result<(), NotifyError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[tokio::test]
    async fn publishes_to_current_set_only() {
        let bx = Broadcaster::new(Config::default());
        let a = Recorder::arc("a");
        let b = Recorder::arc("b");
        let c = Recorder::arc("c");
        bx.subscribe(a.clone() as SubscriberRef).await;
        bx.subscribe(b.clone() as SubscriberRef).await;
        bx.subscribe(c.clone() as SubscriberRef).await;

        let report = bx.publish(Event::new("rate").with_float(1.0100)).await;
        assert_eq!(report.attempted, 3);
        assert!(report.all_delivered());

        let b_ref = b.clone() as SubscriberRef;
        bx.unsubscribe(&b_ref).await.unwrap();
        let report = bx.publish(Event::new("rate").with_float(1.0550)).await;
        assert_eq!(report.delivered(), 2);

        assert_eq!(a.seen(), vec![1.0100, 1.0550]);
        assert_eq!(b.seen(), vec![1.0100]);
        assert_eq!(c.seen(), vec![1.0100, 1.0550]);
    }

    #[tokio::test]
    async fn duplicate_subscribe_notifies_once() {
        let bx = Broadcaster::new(Config::default());
        let a = Recorder::arc("a");
        bx.subscribe(a.clone() as SubscriberRef).await;
        bx.subscribe(a.clone() as SubscriberRef).await;

        let report = bx.publish(Event::new("rate").with_float(2.0)).await;
        assert_eq!(report.attempted, 1);
        assert_eq!(a.seen(), vec![2.0]);
    }

    #[tokio::test]
    async fn failing_subscriber_does_not_block_others() {
        let bx = Broadcaster::new(Config::default());
        let a = Recorder::arc("a");
        bx.subscribe(a.clone() as SubscriberRef).await;
        bx.subscribe(Arc::new(AlwaysFails) as SubscriberRef).await;
        let c = Recorder::arc("c");
        bx.subscribe(c.clone() as SubscriberRef).await;

        let report = bx.publish(Event::new("rate").with_float(3.0)).await;
        assert_eq!(report.attempted, 3);
        assert_eq!(report.delivered(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "always-fails");
        assert_eq!(report.failures[0].error.as_label(), "delivery_failed");

        // Both healthy subscribers still got the event.
        assert_eq!(a.seen(), vec![3.0]);
        assert_eq!(c.seen(), vec![3.0]);
    }

    #[tokio::test]
    async fn panicking_subscriber_is_isolated() {
        let bx = Broadcaster::new(Config::default());
        bx.subscribe(Arc::new(Panics) as SubscriberRef).await;
        let a = Recorder::arc("a");
        bx.subscribe(a.clone() as SubscriberRef).await;

        let report = bx.publish(Event::new("rate").with_float(4.0)).await;
        assert_eq!(report.delivered(), 1);
        assert_eq!(report.failures[0].name, "panics");
        assert_eq!(report.failures[0].error.as_label(), "delivery_panicked");
        assert_eq!(a.seen(), vec![4.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_subscriber_hits_delivery_timeout() {
        let cfg = Config {
            delivery_timeout: Duration::from_millis(100),
            ..Config::default()
        };
        let bx = Broadcaster::new(cfg);
        bx.subscribe(Arc::new(Slow) as SubscriberRef).await;
        let a = Recorder::arc("a");
        bx.subscribe(a.clone() as SubscriberRef).await;

        let report = bx.publish(Event::new("rate").with_float(5.0)).await;
        assert_eq!(report.delivered(), 1);
        assert_eq!(report.failures[0].name, "slow");
        assert_eq!(report.failures[0].error.as_label(), "delivery_timed_out");
        assert_eq!(a.seen(), vec![5.0]);
    }

    #[tokio::test]
    async fn empty_registry_publish_is_a_noop() {
        let bx = Broadcaster::new(Config::default());
        let report = bx.publish(Event::new("rate").with_float(1.0)).await;
        assert_eq!(report.attempted, 0);
        assert!(report.all_delivered());
    }

    #[tokio::test]
    async fn failures_are_reported_in_registration_order() {
        let bx = Broadcaster::new(Config::default());
        bx.subscribe(Arc::new(Panics) as SubscriberRef).await;
        bx.subscribe(Recorder::arc("ok") as SubscriberRef).await;
        bx.subscribe(Arc::new(AlwaysFails) as SubscriberRef).await;

        let report = bx.publish(Event::new("rate").with_float(6.0)).await;
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].name, "panics");
        assert_eq!(report.failures[1].name, "always-fails");
    }
}
