// Layer 2: Third-party crate imports
use thiserror::Error;

/// Failure returned by [`super::Mailbox::push`] (spec §4.3: `Push(envelope)
/// → ok | Full`).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MailboxError {
    #[error("mailbox is full")]
    Full,
    #[error("mailbox is closed")]
    Closed,
}
