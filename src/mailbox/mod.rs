//! Mailbox (component C3): a pluggable FIFO queue feeding one actor's
//! message pump.

mod error;
mod queue;
mod traits;

pub use error::MailboxError;
pub use queue::{BoundedMailbox, UnboundedMailbox};
pub use traits::Mailbox;
