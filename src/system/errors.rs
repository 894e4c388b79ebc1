//! System-level error types.

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::addr::AddrError;
use crate::mailbox::MailboxError;
use crate::util::ActorId;

/// Failure returned by `Addr::spawn` (spec §4.4 "Spawn ... On any
/// failure before registration, resources are released and a
/// `SpawnError` is returned").
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("behavior initialization failed: {0}")]
    BehaviorInitFailed(String),

    #[error("registration under parent failed: {0}")]
    RegistrationFailed(String),

    #[error("parent {0} has no actor to spawn under")]
    ParentHasNoActor(ActorId),

    /// `Spawn` called on a [`crate::future::FutureAddr`], which cannot
    /// host children.
    #[error("operation not possible on a future address")]
    NotPossible,
}

/// Aggregate error surfaced by runtime-wide operations (system builder,
/// ancestor bootstrap), following the teacher's canonical-struct
/// aggregation pattern of `#[from]`-wrapping subsystem errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Addr(#[from] AddrError),

    #[error(transparent)]
    Mailbox(#[from] MailboxError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error("system is shutting down")]
    ShuttingDown,
}
