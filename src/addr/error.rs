// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Failures surfaced synchronously from [`super::Addr`] operations
/// (spec §4.2, §7 "usage errors" and "delivery errors").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddrError {
    /// `Send`/`Forward` could not reach the target: it is terminated,
    /// unreachable, or its mailbox is full.
    #[error("delivery failed: {0}")]
    DeliveryError(String),

    /// `Spawn`/`AddressOf`/`Children`/`GetChild`/`DeathWatch` called on a
    /// [`crate::future::FutureAddr`], which has no backing actor and no
    /// children.
    #[error("operation not possible on a future address")]
    NotPossible,

    /// `Parent`/`GetAddr`/`GetChild` referenced a node that does not
    /// exist in the hierarchy.
    #[error("address not found")]
    NotFound,

    /// Operation required a backing actor (e.g. state mutation) but the
    /// target has none.
    #[error("target has no actor")]
    HasNoActor,
}
