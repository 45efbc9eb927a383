//! Reversible commands: the do/undo capability and the invoker's history.
//!
//! ## Contents
//! - [`Command`], [`CommandRef`] — paired apply/revert actions with state
//!   captured at construction time
//! - [`CommandFn`] — closure-backed command for simple do/undo pairs
//! - [`Invoker`], [`UndoOutcome`] — bounded LIFO history with single-step undo
//!
//! ## Quick reference
//! - **Callers** wrap a mutating action as a [`Command`] and pass it to
//!   [`Invoker::execute`]; the history records only actions whose effect is
//!   known to have applied.
//! - [`Invoker::undo_last`] reverts the most recent not-yet-undone command;
//!   an empty history is a benign [`UndoOutcome::NothingToUndo`], not an
//!   error.

mod command;
mod invoker;

pub use command::{Command, CommandFn, CommandRef};
pub use invoker::{Invoker, UndoOutcome};
