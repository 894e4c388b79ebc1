// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::error::MailboxError;
use crate::message::Envelope;

/// A FIFO queue with a pluggable bound, feeding one actor's message pump
/// (spec §4.3). Implementations are free to choose their own queueing
/// discipline as long as envelopes from the same sender are popped in
/// push order; this crate's own implementations (see [`super::queue`])
/// use one global FIFO, which trivially satisfies that requirement.
#[async_trait]
pub trait Mailbox: Send + Sync {
    /// Enqueues `envelope`. Never blocks; a bounded mailbox that is
    /// already at capacity returns [`MailboxError::Full`].
    fn push(&self, envelope: Envelope) -> Result<(), MailboxError>;

    /// Awaits and removes the next envelope, or returns `None` once the
    /// mailbox has been [`Mailbox::close`]d and drained.
    async fn recv(&self) -> Option<Envelope>;

    /// Removes and returns the next envelope without waiting, or `None`
    /// if empty.
    fn try_pop(&self) -> Option<Envelope>;

    /// Number of envelopes currently queued.
    fn len(&self) -> usize;

    /// Whether the mailbox currently holds no envelopes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns every currently queued envelope, in FIFO
    /// order, without waiting for more to arrive.
    fn drain(&self) -> Vec<Envelope>;

    /// Marks the mailbox closed: no further envelopes will be accepted,
    /// and any pending [`Mailbox::recv`] wakes once drained. Used by the
    /// message pump to unwind cleanly on `Stop`/`Kill`/`Destroy`.
    fn close(&self);
}
