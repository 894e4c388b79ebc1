//! Convenience re-exports for embedding applications.

pub use crate::actor::{ActorAddr, Behavior, BehaviorError};
pub use crate::addr::{Addr, AddrError};
pub use crate::events::{Event, Subscription};
pub use crate::future::{FutureAddr, FutureError};
pub use crate::mailbox::{BoundedMailbox, Mailbox, MailboxError, UnboundedMailbox};
pub use crate::message::{Envelope, Header};
pub use crate::signal::Signal;
pub use crate::supervisor::{
    AllForOne, Cause, Directive, ExponentialBackoffRestart, OneForOne, RestartingSupervisor,
    Supervisor, SupervisorInvoker,
};
pub use crate::system::{ancestor, Prop, RuntimeError, SpawnError, SystemConfig};
