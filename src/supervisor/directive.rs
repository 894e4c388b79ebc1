// Layer 1: Standard library imports
use std::error::Error as StdError;
use std::sync::Arc;

// Layer 3: Internal module imports
use crate::message::Envelope;

/// The decision a [`super::Supervisor`] reaches for a failing actor
/// (spec §3 "Directive").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Stop,
    Kill,
    Destroy,
    Restart,
    /// Delivers the cause to the parent supervisor instead of acting
    /// locally (spec §4.5 "restart count already ≥ Max ... promoted to
    /// Escalate").
    Escalate,
    /// A panic was captured but the decider chose to take no corrective
    /// action beyond recording it.
    Panic,
    /// No action; the actor continues running.
    Ignore,
}

/// Why a supervisor was invoked (spec §4.5 "Panic routing").
///
/// `Error` holds an `Arc` rather than the `Box` that
/// [`crate::actor::Behavior::action`] returns so that `AllForOne` can fan
/// the same cause out to every sibling without cloning the error itself.
#[derive(Clone)]
pub enum Cause {
    /// `Behavior::action` (or a lifecycle hook) returned `Err`.
    Error(Arc<dyn StdError + Send + Sync>),
    /// `Behavior::action` panicked; `message` is the panic payload
    /// rendered to a string, `envelope` the in-flight message if
    /// recoverable.
    Panic(PanicEvent),
}

impl Cause {
    pub fn description(&self) -> String {
        match self {
            Cause::Error(err) => err.to_string(),
            Cause::Panic(event) => event.message.clone(),
        }
    }
}

/// Captured panic, packaged before being handed to the supervisor (spec
/// §4.5 "package `PanicEvent{cause, envelope, stack}`").
#[derive(Debug, Clone)]
pub struct PanicEvent {
    pub message: String,
    pub envelope: Option<Envelope>,
}

impl PanicEvent {
    pub fn new(message: impl Into<String>, envelope: Option<Envelope>) -> Self {
        Self {
            message: message.into(),
            envelope,
        }
    }
}
