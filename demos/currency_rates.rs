//! # Example: currency_rates
//!
//! Demonstrates event broadcasting to a dynamic subscriber set.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait for several consumer styles
//!   (plain display, threshold alert, built-in [`LogWriter`]).
//! - Publish events and inspect the [`PublishReport`].
//! - Unsubscribe mid-stream; later publishes skip the removed subscriber.
//!
//! ## Flow
//! ```text
//! set_rate ──► Broadcaster.publish(Event "rate")
//!     ├─► MobileApp.notify()       (prints every rate)
//!     ├─► WebDashboard.notify()    (prints every rate)
//!     ├─► AlertSystem.notify()     (prints only above its threshold)
//!     └─► LogWriter.notify()       (one line per event)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example currency_rates --features logging
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use dispatchkit::{
    Broadcaster, Config, Event, LogWriter, NotifyError, Subscribe, SubscriberRef,
};

/// Prints every rate it sees.
struct MobileApp;

#[async_trait]
impl Subscribe for MobileApp {
    async fn notify(&self, event: &Event) -> Result<(), NotifyError> {
        if let Some(rate) = event.as_float() {
            println!("[mobile-app] new rate: {rate}$");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mobile-app"
    }
}

/// Prints every rate it sees, dashboard-style.
struct WebDashboard;

#[async_trait]
impl Subscribe for WebDashboard {
    async fn notify(&self, event: &Event) -> Result<(), NotifyError> {
        if let Some(rate) = event.as_float() {
            println!("[web-dashboard] rate displayed: {rate}$");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "web-dashboard"
    }
}

/// Reacts only above its threshold. The broadcaster knows nothing about
/// thresholds; this is ordinary subscriber-internal state.
struct AlertSystem {
    threshold: f64,
}

#[async_trait]
impl Subscribe for AlertSystem {
    async fn notify(&self, event: &Event) -> Result<(), NotifyError> {
        if let Some(rate) = event.as_float() {
            if rate > self.threshold {
                println!("[alert] warning! rate too high: {rate}$");
            } else {
                println!("[alert] rate is stable: {rate}$");
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "alert"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exchange = Broadcaster::new(Config::default());

    let app = Arc::new(MobileApp) as SubscriberRef;
    let web = Arc::new(WebDashboard) as SubscriberRef;
    let alert = Arc::new(AlertSystem { threshold: 500.0 }) as SubscriberRef;

    exchange.subscribe(Arc::clone(&app)).await;
    exchange.subscribe(Arc::clone(&web)).await;
    exchange.subscribe(Arc::clone(&alert)).await;
    exchange.subscribe(Arc::new(LogWriter) as SubscriberRef).await;

    for rate in [450.0, 520.0, 480.0] {
        let report = exchange.publish(Event::new("rate").with_float(rate)).await;
        println!(
            "-- published rate={rate}: {}/{} delivered\n",
            report.delivered(),
            report.attempted
        );
    }

    // The dashboard goes away; later publishes skip it.
    exchange.unsubscribe(&web).await.expect("web was subscribed");
    let report = exchange.publish(Event::new("rate").with_float(505.0)).await;
    println!(
        "-- published rate=505 after unsubscribe: {}/{} delivered",
        report.delivered(),
        report.attempted
    );
}
