//! Actor core (component C4): lifecycle state machine, message pump,
//! panic trap.

mod behavior;
mod context;
mod core;
mod stats;

pub use behavior::{Behavior, BehaviorError};
pub use context::ActorContext;
pub use core::ActorAddr;
pub use stats::{Stat, StatSnapshot};
