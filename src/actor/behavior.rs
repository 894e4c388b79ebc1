// Layer 1: Standard library imports
use std::error::Error as StdError;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::addr::Addr;
use crate::message::Envelope;

/// Error type returned by [`Behavior`] hooks.
///
/// Unlike the teacher's `Actor::Error` associated type, `Behavior` must be
/// object-safe so heterogeneous actors can share one [`Addr`] type (spec
/// §3 "Addr ... Two disjoint variants"); a boxed trait object plays the
/// role an associated error type would in a purely generic design.
pub type BehaviorError = Box<dyn StdError + Send + Sync>;

/// Application logic invoked by an actor's message pump (spec §6
/// "Behavior interface").
///
/// `Action` is the only required method; the lifecycle hooks default to
/// no-ops, mirroring the teacher's `Actor` trait defaults for
/// `pre_start`/`post_stop`.
#[async_trait]
pub trait Behavior: Send + Sync + 'static {
    /// Processes one envelope. Returning `Err` or panicking both route
    /// through the owning supervisor (spec §4.5 "Panic routing"); a
    /// returned `Err` is treated as a `Cause::Error`, a panic as
    /// `Cause::Panic`.
    async fn action(&mut self, envelope: Envelope, self_addr: &Addr) -> Result<(), BehaviorError>;

    /// Runs once, after the message pump starts but before the first
    /// envelope is popped.
    async fn post_start(&mut self, _self_addr: &Addr) -> Result<(), BehaviorError> {
        Ok(())
    }

    /// Runs before a graceful `Stop` detaches the actor.
    async fn pre_stop(&mut self, _self_addr: &Addr) -> Result<(), BehaviorError> {
        Ok(())
    }

    /// Runs before an abrupt `Kill` detaches the actor.
    async fn pre_kill(&mut self, _self_addr: &Addr) -> Result<(), BehaviorError> {
        Ok(())
    }

    /// Runs before a `Restart` rebuilds the behavior from `Prop`.
    async fn pre_restart(&mut self, _reason: &str, _self_addr: &Addr) -> Result<(), BehaviorError> {
        Ok(())
    }

    /// Runs once the replacement behavior is in place and the mailbox is
    /// about to resume draining.
    async fn post_restart(&mut self, _self_addr: &Addr) -> Result<(), BehaviorError> {
        Ok(())
    }
}
