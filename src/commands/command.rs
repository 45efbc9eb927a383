//! # Command abstraction and closure-backed implementation.
//!
//! This module defines the [`Command`] trait (paired async apply/revert
//! actions) and a convenient closure-backed implementation [`CommandFn`].
//! The common handle type is [`CommandRef`], an `Arc<dyn Command>` suitable
//! for pushing onto the invoker's history.
//!
//! ## Undo-state capture
//! Any state the undo action needs (e.g. the previous thermostat temperature)
//! must be captured when the command is **constructed**, not re-read at undo
//! time: the underlying resource may have changed in between, and undo must
//! restore the command's own prior value, not a newer interim one.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use dispatchkit::{Command, CommandError, CommandFn, CommandRef};
//!
//! let thermostat = Arc::new(Mutex::new(20_i64));
//!
//! // Capture the previous temperature now, at construction.
//! let prev = *thermostat.lock().unwrap();
//! let set = Arc::clone(&thermostat);
//! let unset = Arc::clone(&thermostat);
//! let cmd: CommandRef = CommandFn::arc(
//!     "thermostat-set-25",
//!     move || {
//!         let set = Arc::clone(&set);
//!         async move {
//!             *set.lock().unwrap() = 25;
//!             Ok::<(), CommandError>(())
//!         }
//!     },
//!     move || {
//!         let unset = Arc::clone(&unset);
//!         async move {
//!             *unset.lock().unwrap() = prev;
//!             Ok::<(), CommandError>(())
//!         }
//!     },
//! );
//! assert_eq!(cmd.name(), "thermostat-set-25");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CommandError;

/// Shared handle to a command.
///
/// Owned by the invoker's history once pushed.
pub type CommandRef = Arc<dyn Command>;

/// # Reversible unit of work.
///
/// A `Command` has a stable [`name`](Command::name) and exactly one valid
/// apply/revert pair. It is immutable once constructed; the state `revert`
/// needs must already be inside it (see the module docs).
#[async_trait]
pub trait Command: Send + Sync + 'static {
    /// Returns a stable, human-readable command name.
    fn name(&self) -> &str;

    /// Applies the command's effect ("do").
    ///
    /// On error the invoker does not record the command; the effect is
    /// assumed not to have applied.
    async fn apply(&self) -> Result<(), CommandError>;

    /// Reverses the command's effect ("undo"), restoring the value captured
    /// at construction time.
    async fn revert(&self) -> Result<(), CommandError>;
}

/// Closure-backed command implementation.
///
/// Wraps a pair of closures that each *create* a fresh future per call, so
/// no shared mutable state is needed between apply and revert. Shared state
/// the closures do need (the target resource, the captured previous value)
/// is moved into them explicitly.
#[derive(Debug)]
pub struct CommandFn<D, U> {
    name: Cow<'static, str>,
    apply: D,
    revert: U,
}

impl<D, U> CommandFn<D, U> {
    /// Creates a new closure-backed command.
    ///
    /// Prefer [`CommandFn::arc`] when you immediately need a [`CommandRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, apply: D, revert: U) -> Self {
        Self {
            name: name.into(),
            apply,
            revert,
        }
    }

    /// Creates the command and returns it as a shared handle (`Arc<Self>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, apply: D, revert: U) -> Arc<Self> {
        Arc::new(Self::new(name, apply, revert))
    }
}

#[async_trait]
impl<D, DFut, U, UFut> Command for CommandFn<D, U>
where
    D: Fn() -> DFut + Send + Sync + 'static,
    DFut: Future<Output = Result<(), CommandError>> + Send + 'static,
    U: Fn() -> UFut + Send + Sync + 'static,
    UFut: Future<Output = Result<(), CommandError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self) -> Result<(), CommandError> {
        (self.apply)().await
    }

    async fn revert(&self) -> Result<(), CommandError> {
        (self.revert)().await
    }
}
