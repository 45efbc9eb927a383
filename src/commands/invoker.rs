//! # Invoker: bounded LIFO history of executed commands.
//!
//! [`Invoker`] executes [`Command`]s and records them for later undo.
//!
//! ## Rules
//! - **Push on success only**: a command whose apply fails is not recorded;
//!   the history reflects only effects known to have applied.
//! - **LIFO invariant**: the top of the history is always the most recently
//!   executed, not-yet-undone command.
//! - **Single-step undo**: [`undo_last`](Invoker::undo_last) reverts exactly
//!   one command; there is no redo stack.
//! - **Serialized per instance**: execute/undo hold the history lock for the
//!   duration of the underlying action, so concurrent calls on the same
//!   invoker append in the order their apply actions complete.
//! - **Bounded**: with [`Config::history_capacity`] set, executing past the
//!   cap drops the oldest entry.

use std::collections::VecDeque;

use tokio::sync::Mutex;

use crate::commands::{Command, CommandRef};
use crate::config::Config;
use crate::error::InvokerError;

/// Result of an undo attempt that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The named command was reverted and removed from the history.
    Undone {
        /// Name of the reverted command.
        command: String,
    },
    /// The history was empty; nothing happened. A benign signal, not an
    /// error.
    NothingToUndo,
}

impl UndoOutcome {
    /// Returns `true` if the history was empty and no undo took place.
    pub fn is_noop(&self) -> bool {
        matches!(self, UndoOutcome::NothingToUndo)
    }
}

/// Executes commands and keeps the undo history.
///
/// Owns the commands once pushed. One invoker instance is one history;
/// independent histories are independent invokers.
pub struct Invoker {
    history: Mutex<VecDeque<CommandRef>>,
    cfg: Config,
}

impl Invoker {
    /// Creates an invoker with an empty history.
    pub fn new(cfg: Config) -> Self {
        Self {
            history: Mutex::new(VecDeque::new()),
            cfg,
        }
    }

    /// Runs the command's apply action, then pushes it onto the history.
    ///
    /// If apply fails, the command is **not** pushed and the error surfaces
    /// as [`InvokerError::ExecutionFailed`]. If the history is at capacity,
    /// the oldest entry is dropped to make room.
    pub async fn execute(&self, command: CommandRef) -> Result<(), InvokerError> {
        let mut history = self.history.lock().await;

        if let Err(source) = command.apply().await {
            return Err(InvokerError::ExecutionFailed {
                command: command.name().to_string(),
                source,
            });
        }

        if let Some(limit) = self.cfg.history_limit() {
            while history.len() >= limit {
                history.pop_front();
            }
        }
        history.push_back(command);
        Ok(())
    }

    /// Pops the most recent command and runs its revert action.
    ///
    /// - Empty history: returns [`UndoOutcome::NothingToUndo`] with no side
    ///   effects.
    /// - Revert failure: surfaces as [`InvokerError::UndoFailed`]; the
    ///   command is **not** re-pushed. No retry is attempted — callers that
    ///   need retry must design idempotent undo actions.
    pub async fn undo_last(&self) -> Result<UndoOutcome, InvokerError> {
        let mut history = self.history.lock().await;

        let Some(command) = history.pop_back() else {
            return Ok(UndoOutcome::NothingToUndo);
        };

        match command.revert().await {
            Ok(()) => Ok(UndoOutcome::Undone {
                command: command.name().to_string(),
            }),
            Err(source) => Err(InvokerError::UndoFailed {
                command: command.name().to_string(),
                source,
            }),
        }
    }

    /// Returns the number of executed, not-yet-undone commands.
    pub async fn depth(&self) -> usize {
        self.history.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
    use std::sync::Arc;

    use crate::commands::CommandFn;
    use crate::error::CommandError;

    /// Toggle command over a shared boolean, "on" as apply, "off" as revert.
    fn switch_on(name: &'static str, state: &Arc<AtomicBool>) -> CommandRef {
        let on = Arc::clone(state);
        let off = Arc::clone(state);
        CommandFn::arc(
            name,
            move || {
                let on = Arc::clone(&on);
                async move {
                    on.store(true, Ordering::SeqCst);
                    Ok::<(), CommandError>(())
                }
            },
            move || {
                let off = Arc::clone(&off);
                async move {
                    off.store(false, Ordering::SeqCst);
                    Ok::<(), CommandError>(())
                }
            },
        )
    }

    #[tokio::test]
    async fn execute_then_undo_walks_the_stack() {
        let invoker = Invoker::new(Config::default());
        let light = Arc::new(AtomicBool::new(false));
        let door = Arc::new(AtomicBool::new(false));

        invoker.execute(switch_on("light-on", &light)).await.unwrap();
        assert!(light.load(Ordering::SeqCst));
        assert_eq!(invoker.depth().await, 1);

        invoker.execute(switch_on("door-open", &door)).await.unwrap();
        assert_eq!(invoker.depth().await, 2);

        // LIFO: the door closes first, then the light goes off.
        let out = invoker.undo_last().await.unwrap();
        assert_eq!(out, UndoOutcome::Undone { command: "door-open".into() });
        assert!(!door.load(Ordering::SeqCst));
        assert!(light.load(Ordering::SeqCst));
        assert_eq!(invoker.depth().await, 1);

        let out = invoker.undo_last().await.unwrap();
        assert_eq!(out, UndoOutcome::Undone { command: "light-on".into() });
        assert!(!light.load(Ordering::SeqCst));
        assert_eq!(invoker.depth().await, 0);

        let out = invoker.undo_last().await.unwrap();
        assert!(out.is_noop());
        assert!(!light.load(Ordering::SeqCst));
        assert!(!door.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn undo_restores_value_captured_at_construction() {
        let invoker = Invoker::new(Config::default());
        let thermostat = Arc::new(AtomicI64::new(20));

        // Captured previous value: 20.
        let prev = thermostat.load(Ordering::SeqCst);
        let set = Arc::clone(&thermostat);
        let unset = Arc::clone(&thermostat);
        let cmd = CommandFn::arc(
            "thermostat-set-25",
            move || {
                let set = Arc::clone(&set);
                async move {
                    set.store(25, Ordering::SeqCst);
                    Ok::<(), CommandError>(())
                }
            },
            move || {
                let unset = Arc::clone(&unset);
                async move {
                    unset.store(prev, Ordering::SeqCst);
                    Ok::<(), CommandError>(())
                }
            },
        );
        invoker.execute(cmd).await.unwrap();

        // An unrelated actor nudges the thermostat through another path.
        thermostat.store(23, Ordering::SeqCst);

        // Undo restores the command's own prior value, not the interim one.
        invoker.undo_last().await.unwrap();
        assert_eq!(thermostat.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn failed_apply_is_not_recorded() {
        let invoker = Invoker::new(Config::default());
        let cmd = CommandFn::arc(
            "broken",
            || async { Err::<(), CommandError>(CommandError::failed("fuse blown")) },
            || async { Ok::<(), CommandError>(()) },
        );

        let err = invoker.execute(cmd).await.unwrap_err();
        assert_eq!(err.as_label(), "command_execution_failed");
        assert_eq!(invoker.depth().await, 0);
        assert!(invoker.undo_last().await.unwrap().is_noop());
    }

    #[tokio::test]
    async fn failed_undo_is_not_repushed() {
        let invoker = Invoker::new(Config::default());
        let cmd = CommandFn::arc(
            "sticky",
            || async { Ok::<(), CommandError>(()) },
            || async { Err::<(), CommandError>(CommandError::failed("stuck")) },
        );

        invoker.execute(cmd).await.unwrap();
        let err = invoker.undo_last().await.unwrap_err();
        assert_eq!(err.as_label(), "command_undo_failed");
        assert_eq!(invoker.depth().await, 0);
    }

    #[tokio::test]
    async fn capacity_drops_oldest_entry() {
        let cfg = Config {
            history_capacity: 2,
            ..Config::default()
        };
        let invoker = Invoker::new(cfg);
        let a = Arc::new(AtomicBool::new(false));
        let b = Arc::new(AtomicBool::new(false));
        let c = Arc::new(AtomicBool::new(false));

        invoker.execute(switch_on("a", &a)).await.unwrap();
        invoker.execute(switch_on("b", &b)).await.unwrap();
        invoker.execute(switch_on("c", &c)).await.unwrap();
        assert_eq!(invoker.depth().await, 2);

        // "a" fell off the bottom; undo reaches c, then b, then nothing.
        assert_eq!(
            invoker.undo_last().await.unwrap(),
            UndoOutcome::Undone { command: "c".into() }
        );
        assert_eq!(
            invoker.undo_last().await.unwrap(),
            UndoOutcome::Undone { command: "b".into() }
        );
        assert!(invoker.undo_last().await.unwrap().is_noop());
        assert!(a.load(Ordering::SeqCst));
    }
}
