//! Error types used by the dispatch core.
//!
//! This module defines the structured outcomes the core hands back to callers:
//!
//! - [`DispatchError`] — lookup failures in the subscriber registry and the
//!   participant directory (unknown handle, unknown recipient, unregistered
//!   sender).
//! - [`NotifyError`] — the error a subscriber or participant returns from its
//!   own delivery handler.
//! - [`DeliveryError`] — how the broadcaster/router classifies one failed
//!   delivery (handler error, timeout, or panic).
//! - [`CommandError`] — errors raised by a command's apply/revert actions.
//! - [`InvokerError`] — errors surfaced by the invoker when an execute or
//!   undo fails.
//!
//! All of these are recoverable by the caller; none terminates the hosting
//! process. The core never logs on behalf of callers — it returns these
//! structured outcomes and lets the caller decide on logging or user-facing
//! messaging. Types provide `as_label` helpers (snake_case, stable) for
//! logs/metrics.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use thiserror::Error;

/// # Lookup failures in the registry and directory.
///
/// These are the non-fatal "not found" outcomes: no state changes, the caller
/// simply learns the reference it held is stale or the name it used is
/// unknown.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Unsubscribe was called with a handle that is not registered.
    #[error("subscriber \"{name}\" is not registered")]
    SubscriberNotFound {
        /// Name of the unknown subscriber (as reported by its handle).
        name: String,
    },

    /// A directly-addressed message named a recipient that is not in the directory.
    #[error("recipient \"{name}\" not found")]
    RecipientNotFound {
        /// The unknown recipient name.
        name: String,
    },

    /// Leave was called for a name with no binding in the directory.
    #[error("participant \"{name}\" is not in the directory")]
    ParticipantNotFound {
        /// The unknown participant name.
        name: String,
    },

    /// A participant tried to send without having joined the directory.
    #[error("sender \"{name}\" is not registered")]
    SenderNotRegistered {
        /// The sender name that has no binding.
        name: String,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::SubscriberNotFound { .. } => "subscriber_not_found",
            DispatchError::RecipientNotFound { .. } => "recipient_not_found",
            DispatchError::ParticipantNotFound { .. } => "participant_not_found",
            DispatchError::SenderNotRegistered { .. } => "sender_not_registered",
        }
    }
}

/// # Error returned by a delivery handler.
///
/// Subscribers ([`Subscribe::notify`](crate::Subscribe::notify)) and
/// participants ([`Participant::receive`](crate::Participant::receive))
/// return this to signal that they could not process a delivery. The
/// broadcaster/router collects it into a [`DeliveryError::Failed`] entry of
/// the post-delivery report; it never aborts the remaining deliveries.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The handler could not process the delivery.
    #[error("{error}")]
    Failed {
        /// Human-readable description of what went wrong.
        error: String,
    },
}

impl NotifyError {
    /// Shorthand constructor for the common case.
    pub fn failed(error: impl Into<String>) -> Self {
        NotifyError::Failed { error: error.into() }
    }
}

/// # Classification of one failed delivery.
///
/// Produced by the broadcaster/router for each target that did not receive
/// the event/message cleanly. Collected into
/// [`PublishReport`](crate::PublishReport) / [`RouteReceipt`](crate::RouteReceipt)
/// after the fan-out completes.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The handler returned a [`NotifyError`].
    #[error("handler error: {error}")]
    Failed {
        /// The handler's own description of the failure.
        error: String,
    },

    /// The delivery exceeded the configured per-delivery timeout.
    #[error("timed out after {timeout:?}")]
    TimedOut {
        /// The timeout that was exceeded.
        timeout: Duration,
    },

    /// The handler panicked; the panic was caught and isolated.
    #[error("handler panicked: {info}")]
    Panicked {
        /// Panic payload, best-effort stringified.
        info: String,
    },
}

impl DeliveryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            DeliveryError::Failed { .. } => "delivery_failed",
            DeliveryError::TimedOut { .. } => "delivery_timed_out",
            DeliveryError::Panicked { .. } => "delivery_panicked",
        }
    }
}

/// One failed delivery, paired with the target's name.
///
/// Appears in [`PublishReport::failures`](crate::PublishReport) and
/// [`RouteReceipt::failures`](crate::RouteReceipt) in snapshot order.
#[derive(Debug, Clone)]
pub struct DeliveryFailure {
    /// Name of the subscriber/participant that did not receive the delivery.
    pub name: String,
    /// What went wrong.
    pub error: DeliveryError,
}

/// # Errors raised by a command's own actions.
///
/// Returned by [`Command::apply`](crate::Command::apply) and
/// [`Command::revert`](crate::Command::revert). The invoker wraps these into
/// [`InvokerError`] with the command's name attached.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The action could not be applied/reverted.
    #[error("{error}")]
    Failed {
        /// Human-readable description of the failure.
        error: String,
    },
}

impl CommandError {
    /// Shorthand constructor for the common case.
    pub fn failed(error: impl Into<String>) -> Self {
        CommandError::Failed { error: error.into() }
    }
}

/// # Errors surfaced by the invoker.
///
/// - `ExecutionFailed`: the "do" action failed; the command was **not** pushed
///   onto the history (history reflects only effects known to have applied).
/// - `UndoFailed`: the "undo" action failed; the command was popped and is
///   **not** re-pushed (partial application makes a blind retry unsafe —
///   callers needing retry must design idempotent undo actions).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum InvokerError {
    /// A command's "do" action failed during [`Invoker::execute`](crate::Invoker::execute).
    #[error("command \"{command}\" failed to apply: {source}")]
    ExecutionFailed {
        /// Name of the failing command.
        command: String,
        /// The command's own error.
        #[source]
        source: CommandError,
    },

    /// A command's "undo" action failed during [`Invoker::undo_last`](crate::Invoker::undo_last).
    #[error("command \"{command}\" failed to revert: {source}")]
    UndoFailed {
        /// Name of the failing command.
        command: String,
        /// The command's own error.
        #[source]
        source: CommandError,
    },
}

impl InvokerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            InvokerError::ExecutionFailed { .. } => "command_execution_failed",
            InvokerError::UndoFailed { .. } => "command_undo_failed",
        }
    }
}

/// Runs one delivery future under the partial-failure isolation rules.
///
/// Classifies the outcome into a [`DeliveryError`]:
/// - a handler error becomes [`DeliveryError::Failed`];
/// - exceeding `deadline` (when set) becomes [`DeliveryError::TimedOut`];
/// - a panic is caught and becomes [`DeliveryError::Panicked`].
///
/// `AssertUnwindSafe` is used to catch panics; a handler that panics while
/// holding shared locked state can leave that state inconsistent.
pub(crate) async fn guard_delivery<F>(
    delivery: F,
    deadline: Option<Duration>,
) -> Result<(), DeliveryError>
where
    F: Future<Output = Result<(), NotifyError>>,
{
    let call = AssertUnwindSafe(delivery).catch_unwind();
    let outcome = match deadline {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(res) => res,
            Err(_) => return Err(DeliveryError::TimedOut { timeout: limit }),
        },
        None => call.await,
    };
    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(DeliveryError::Failed {
            error: err.to_string(),
        }),
        Err(panic) => Err(DeliveryError::Panicked {
            info: describe_panic(panic),
        }),
    }
}

/// Best-effort stringification of a caught panic payload.
pub(crate) fn describe_panic(payload: Box<dyn Any + Send>) -> String {
    let any = &*payload;
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let err = DispatchError::RecipientNotFound { name: "bob".into() };
        assert_eq!(err.as_label(), "recipient_not_found");

        let err = DeliveryError::TimedOut {
            timeout: Duration::from_secs(1),
        };
        assert_eq!(err.as_label(), "delivery_timed_out");

        let err = InvokerError::ExecutionFailed {
            command: "light-on".into(),
            source: CommandError::failed("boom"),
        };
        assert_eq!(err.as_label(), "command_execution_failed");
    }

    #[test]
    fn messages_carry_context() {
        let err = DispatchError::SenderNotRegistered { name: "Nika".into() };
        assert_eq!(err.to_string(), "sender \"Nika\" is not registered");

        let err = InvokerError::UndoFailed {
            command: "door-open".into(),
            source: CommandError::failed("jammed"),
        };
        assert!(err.to_string().contains("door-open"));
        assert!(err.to_string().contains("jammed"));
    }

    #[test]
    fn panic_payloads_stringify() {
        assert_eq!(describe_panic(Box::new("static msg")), "static msg");
        assert_eq!(describe_panic(Box::new(String::from("owned"))), "owned");
        assert_eq!(describe_panic(Box::new(42_u32)), "unknown panic");
    }

    #[tokio::test]
    async fn guard_classifies_outcomes() {
        let ok = guard_delivery(async { Ok(()) }, None).await;
        assert!(ok.is_ok());

        let failed = guard_delivery(async { Err(NotifyError::failed("nope")) }, None).await;
        assert_eq!(
            failed,
            Err(DeliveryError::Failed {
                error: "nope".into()
            })
        );

        let panicked = guard_delivery(async { panic!("boom") }, None).await;
        assert_eq!(
            panicked,
            Err(DeliveryError::Panicked { info: "boom".into() })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn guard_enforces_deadline() {
        let limit = Duration::from_millis(10);
        let slow = guard_delivery(
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
            Some(limit),
        )
        .await;
        assert_eq!(slow, Err(DeliveryError::TimedOut { timeout: limit }));
    }
}
