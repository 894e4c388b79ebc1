// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

// Layer 3: Internal module imports
use super::error::MailboxError;
use super::traits::Mailbox;
use crate::message::Envelope;

/// A single global FIFO backing both [`UnboundedMailbox`] and
/// [`BoundedMailbox`] (spec §4.3: "out of scope: concrete mailbox queue
/// implementation beyond the pluggable contract" — this crate is free to
/// pick one). `capacity: None` means unbounded.
struct QueueMailbox {
    queue: Mutex<VecDeque<Envelope>>,
    capacity: Option<usize>,
    notify: Notify,
    closed: AtomicBool,
}

impl QueueMailbox {
    fn new(capacity: Option<usize>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            capacity,
            notify: Notify::new(),
            closed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Mailbox for QueueMailbox {
    fn push(&self, envelope: Envelope) -> Result<(), MailboxError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(MailboxError::Closed);
        }
        let mut queue = self.queue.lock();
        if let Some(cap) = self.capacity {
            if queue.len() >= cap {
                return Err(MailboxError::Full);
            }
        }
        queue.push_back(envelope);
        drop(queue);
        self.notify.notify_one();
        Ok(())
    }

    async fn recv(&self) -> Option<Envelope> {
        loop {
            if let Some(envelope) = self.queue.lock().pop_front() {
                return Some(envelope);
            }
            if self.closed.load(Ordering::Acquire) {
                return None;
            }
            self.notify.notified().await;
        }
    }

    fn try_pop(&self) -> Option<Envelope> {
        self.queue.lock().pop_front()
    }

    fn len(&self) -> usize {
        self.queue.lock().len()
    }

    fn drain(&self) -> Vec<Envelope> {
        self.queue.lock().drain(..).collect()
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }
}

/// Unbounded FIFO mailbox, the `Prop::mailbox` default (spec §6).
pub struct UnboundedMailbox(QueueMailbox);

impl UnboundedMailbox {
    pub fn new() -> Self {
        Self(QueueMailbox::new(None))
    }
}

impl Default for UnboundedMailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailbox for UnboundedMailbox {
    fn push(&self, envelope: Envelope) -> Result<(), MailboxError> {
        self.0.push(envelope)
    }
    async fn recv(&self) -> Option<Envelope> {
        self.0.recv().await
    }
    fn try_pop(&self) -> Option<Envelope> {
        self.0.try_pop()
    }
    fn len(&self) -> usize {
        self.0.len()
    }
    fn drain(&self) -> Vec<Envelope> {
        self.0.drain()
    }
    fn close(&self) {
        self.0.close()
    }
}

/// Fixed-capacity FIFO mailbox; `push` past capacity returns
/// [`MailboxError::Full`] rather than blocking (spec §4.3).
pub struct BoundedMailbox(QueueMailbox);

impl BoundedMailbox {
    pub fn new(capacity: usize) -> Self {
        Self(QueueMailbox::new(Some(capacity)))
    }
}

#[async_trait]
impl Mailbox for BoundedMailbox {
    fn push(&self, envelope: Envelope) -> Result<(), MailboxError> {
        self.0.push(envelope)
    }
    async fn recv(&self) -> Option<Envelope> {
        self.0.recv().await
    }
    fn try_pop(&self) -> Option<Envelope> {
        self.0.try_pop()
    }
    fn len(&self) -> usize {
        self.0.len()
    }
    fn drain(&self) -> Vec<Envelope> {
        self.0.drain()
    }
    fn close(&self) {
        self.0.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::DeadLetters;
    use crate::message::Header;

    fn env() -> Envelope {
        let sender = DeadLetters::standalone_for_test().addr();
        Envelope::new(sender, Header::new(), 7i32)
    }

    #[tokio::test]
    async fn unbounded_push_then_recv() {
        let mbox = UnboundedMailbox::new();
        mbox.push(env()).unwrap();
        assert_eq!(mbox.len(), 1);
        let got = mbox.recv().await.unwrap();
        assert_eq!(got.downcast_ref::<i32>(), Some(&7));
    }

    #[test]
    fn bounded_rejects_past_capacity() {
        let mbox = BoundedMailbox::new(1);
        mbox.push(env()).unwrap();
        assert_eq!(mbox.push(env()), Err(MailboxError::Full));
    }

    #[tokio::test]
    async fn recv_returns_none_after_close_and_drain() {
        let mbox = UnboundedMailbox::new();
        mbox.push(env()).unwrap();
        mbox.close();
        assert!(mbox.recv().await.is_some());
        assert!(mbox.recv().await.is_none());
    }

    #[test]
    fn push_after_close_is_rejected() {
        let mbox = UnboundedMailbox::new();
        mbox.close();
        assert_eq!(mbox.push(env()), Err(MailboxError::Closed));
    }
}
