// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Failures specific to addressable one-shot futures (spec §4.7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FutureError {
    /// `Send`/`Forward`/`SendWithHeader`/`Resolve` called after the future
    /// already holds a result.
    #[error("future already resolved")]
    FutureResolved,

    /// Placed as the rejection's cause when a `TimedFuture` reaches its
    /// deadline without resolving.
    #[error("future timed out before resolution")]
    FutureTimeout,

    /// Placed as the rejection's cause when `Escalate` is invoked directly
    /// by caller code rather than by a deadline.
    #[error("future escalated: {0}")]
    FutureEscalatedFailure(String),
}
