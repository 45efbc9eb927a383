//! # Example: smart_home
//!
//! Demonstrates reversible commands and the invoker's undo history.
//!
//! Shows how to:
//! - Implement [`Command`] for a device with on/off state.
//! - Use [`CommandFn`] with undo state captured at construction time
//!   (the thermostat's previous temperature).
//! - Walk the LIFO history back with [`Invoker::undo_last`] until the
//!   benign [`UndoOutcome::NothingToUndo`] signal.
//!
//! ## Run
//! ```bash
//! cargo run --example smart_home
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dispatchkit::{Command, CommandError, CommandFn, CommandRef, Config, Invoker, UndoOutcome};

/// A light with a printable name and an on/off state.
struct Light {
    name: &'static str,
    on: Mutex<bool>,
}

impl Light {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            on: Mutex::new(false),
        })
    }

    fn set(&self, on: bool) {
        *self.on.lock().unwrap() = on;
        println!(
            "{} light is {}",
            self.name,
            if on { "ON" } else { "OFF" }
        );
    }
}

/// Turns a light on; undo turns it back off.
struct LightOn {
    light: Arc<Light>,
}

#[async_trait]
impl Command for LightOn {
    fn name(&self) -> &str {
        "light-on"
    }

    async fn apply(&self) -> Result<(), CommandError> {
        self.light.set(true);
        Ok(())
    }

    async fn revert(&self) -> Result<(), CommandError> {
        self.light.set(false);
        Ok(())
    }
}

fn thermostat_set(thermostat: &Arc<Mutex<i64>>, target: i64) -> CommandRef {
    // Undo state captured now: if anything else changes the thermostat
    // between execute and undo, undo still restores *this* prior value.
    let prev = *thermostat.lock().unwrap();
    let set = Arc::clone(thermostat);
    let unset = Arc::clone(thermostat);
    CommandFn::arc(
        "thermostat-set",
        move || {
            let set = Arc::clone(&set);
            async move {
                *set.lock().unwrap() = target;
                println!("thermostat set to {target}°C");
                Ok::<(), CommandError>(())
            }
        },
        move || {
            let unset = Arc::clone(&unset);
            async move {
                *unset.lock().unwrap() = prev;
                println!("thermostat set to {prev}°C");
                Ok::<(), CommandError>(())
            }
        },
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let invoker = Invoker::new(Config::default());
    let light = Light::new("living-room");
    let thermostat = Arc::new(Mutex::new(22_i64));

    invoker
        .execute(Arc::new(LightOn {
            light: Arc::clone(&light),
        }) as CommandRef)
        .await
        .expect("light-on applies");
    invoker
        .execute(thermostat_set(&thermostat, 25))
        .await
        .expect("thermostat-set applies");
    println!("history depth: {}", invoker.depth().await);

    // Undo walks back in LIFO order: thermostat first, then the light.
    loop {
        match invoker.undo_last().await.expect("undo succeeds") {
            UndoOutcome::Undone { command } => println!("undone: {command}"),
            UndoOutcome::NothingToUndo => {
                println!("nothing to undo");
                break;
            }
        }
    }
}
