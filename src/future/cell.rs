// Layer 1: Standard library imports
use std::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use parking_lot::{Mutex, RwLock};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

// Layer 3: Internal module imports
use super::error::FutureError;
use crate::addr::Addr;
use crate::events::{Event, EventStream, FutureRejected, FutureResolved, Subscription};
use crate::message::{Envelope, ErrorPayload, Header};
use crate::signal::Signal;
use crate::util::FutureId;

/// A pending continuation registered before resolution (spec §4.7 "Pipe").
enum PipeTarget {
    Callback(Box<dyn FnMut(Envelope) + Send>),
    Forward(Addr),
}

struct FutureInner {
    result: Option<Envelope>,
    pipes: Vec<PipeTarget>,
}

struct FutureCell {
    id: FutureId,
    parent: Addr,
    state: RwLock<Signal>,
    inner: Mutex<FutureInner>,
    notify: Notify,
    watchers: EventStream,
    timer: Mutex<Option<JoinHandle<()>>>,
}

/// Handle to an addressable one-shot future (spec §4.7).
///
/// Resolves exactly once; every operation after the first is a no-op
/// returning [`FutureError::FutureResolved`]. Exposes the same
/// [`crate::addr::Addr`]-shaped surface as an actor minus the
/// actor-specific capabilities — see [`crate::addr::Addr`]'s dispatch for
/// which calls are rejected with [`crate::addr::AddrError::NotPossible`].
#[derive(Clone)]
pub struct FutureAddr(Arc<FutureCell>);

impl PartialEq for FutureAddr {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}
impl Eq for FutureAddr {}

impl std::fmt::Debug for FutureAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FutureAddr({})", self.0.id)
    }
}

impl FutureAddr {
    /// Creates an unresolved future whose conceptual parent is `owner`
    /// (the actor or future that created it).
    pub fn new(owner: Addr) -> Self {
        Self(Arc::new(FutureCell {
            id: FutureId::new(),
            parent: owner,
            state: RwLock::new(Signal::Running),
            inner: Mutex::new(FutureInner {
                result: None,
                pipes: Vec::new(),
            }),
            notify: Notify::new(),
            watchers: EventStream::new(),
            timer: Mutex::new(None),
        }))
    }

    /// Creates a future that auto-escalates with
    /// [`FutureError::FutureTimeout`] if it has not resolved by `deadline`
    /// (spec §4.7 "TimedFuture").
    pub fn new_timed(owner: Addr, deadline: Duration) -> Self {
        let future = Self::new(owner);
        let armed = future.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            let _ = armed.escalate(FutureError::FutureTimeout).await;
        });
        *future.0.timer.lock() = Some(handle);
        future
    }

    /// `new_timed` using `SystemConfig::default().default_future_timeout`
    /// as the deadline (spec §7.2 "crate-wide defaults").
    pub fn new_timed_default(owner: Addr) -> Self {
        Self::new_timed(owner, crate::system::SystemConfig::default().default_future_timeout)
    }

    pub fn id(&self) -> FutureId {
        self.0.id
    }

    pub fn state(&self) -> Signal {
        *self.0.state.read()
    }

    pub fn parent(&self) -> Addr {
        self.0.parent.clone()
    }

    pub fn ancestor(&self) -> Addr {
        self.0.parent.ancestor()
    }

    fn cancel_timer(&self) {
        if let Some(handle) = self.0.timer.lock().take() {
            handle.abort();
        }
    }

    /// `Send(data, sender)` (spec §4.2, §4.7): resolves the future with an
    /// envelope built from `data`.
    pub fn send<T: Any + Send + Sync>(&self, data: T, sender: Addr) -> Result<(), FutureError> {
        self.resolve_sync(Envelope::new(sender, Header::new(), data))
    }

    pub fn send_with_header<T: Any + Send + Sync>(
        &self,
        data: T,
        header: Header,
        sender: Addr,
    ) -> Result<(), FutureError> {
        self.resolve_sync(Envelope::new(sender, header, data))
    }

    /// `Forward(envelope)` (spec §4.2, §4.7): resolves the future with an
    /// already-built envelope, unchanged.
    pub fn forward(&self, envelope: Envelope) -> Result<(), FutureError> {
        self.resolve_sync(envelope)
    }

    /// `Escalate(cause)` (spec §4.7): resolves the future as a rejection
    /// wrapping `cause`.
    ///
    /// Accepts anything convertible into a boxed error — a concrete error
    /// type, a `String`, or a `&str` (`std` provides those conversions) —
    /// rather than attempting to test an arbitrary `Any` value for "is
    /// this an error", which Rust cannot do without specialization.
    pub async fn escalate(
        &self,
        cause: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Result<(), FutureError> {
        let sender = self.dead_letters_sender();
        let payload = ErrorPayload::from_boxed(cause.into());
        self.resolve(Envelope::new(sender, Header::new(), payload)).await
    }

    /// The envelope sender attributed to an auto/manual escalation: the
    /// hierarchy's dead-letters sink, reached via the owning actor tree's
    /// root (`ActorAddr::parent` on a root substitutes its dead-letters
    /// handle — see `crate::actor::ActorAddr::parent`).
    fn dead_letters_sender(&self) -> Addr {
        self.ancestor().parent()
    }

    fn resolve_sync(&self, envelope: Envelope) -> Result<(), FutureError> {
        self.take_result(envelope).map(|pending| {
            tokio::spawn(finish(self.clone(), pending));
        })
    }

    async fn resolve(&self, envelope: Envelope) -> Result<(), FutureError> {
        let pending = self.take_result(envelope)?;
        finish(self.clone(), pending).await;
        Ok(())
    }

    /// Atomically stores `envelope` as the result (failing if already
    /// resolved) and hands back whatever continuations must now run.
    fn take_result(&self, envelope: Envelope) -> Result<Pending, FutureError> {
        let mut inner = self.0.inner.lock();
        if inner.result.is_some() {
            return Err(FutureError::FutureResolved);
        }
        inner.result = Some(envelope.clone());
        let pipes = std::mem::take(&mut inner.pipes);
        Ok(Pending { envelope, pipes })
    }

    /// Registers a continuation invoked with the resolved envelope. Runs
    /// synchronously and immediately if the future is already resolved
    /// (spec §4.7 "PipeAction").
    pub fn pipe_action<F>(&self, mut callback: F)
    where
        F: FnMut(Envelope) + Send + 'static,
    {
        let mut inner = self.0.inner.lock();
        match inner.result.clone() {
            Some(envelope) => {
                drop(inner);
                callback(envelope);
            }
            None => inner.pipes.push(PipeTarget::Callback(Box::new(callback))),
        }
    }

    /// Forwards the resolved envelope to `target` once available (spec
    /// §4.7 "Pipe"). Forwards immediately if already resolved.
    pub fn pipe(&self, target: Addr) {
        let mut inner = self.0.inner.lock();
        match inner.result.clone() {
            Some(envelope) => {
                drop(inner);
                let _ = target.forward(envelope);
            }
            None => inner.pipes.push(PipeTarget::Forward(target)),
        }
    }

    /// Blocks until resolution; returns the rejection's description, or
    /// `None` on a successful resolution (spec §4.7 "Wait").
    pub async fn wait(&self) -> Option<String> {
        loop {
            let notified = self.0.notify.notified();
            {
                let inner = self.0.inner.lock();
                if let Some(envelope) = &inner.result {
                    return envelope.error().map(|e| e.to_string());
                }
            }
            notified.await;
        }
    }

    /// The resolved envelope, if any (spec §4.7 "Result").
    pub fn result(&self) -> Option<Envelope> {
        self.0.inner.lock().result.clone()
    }

    pub fn watch<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(Event) + Send + 'static,
    {
        self.0.watchers.subscribe(callback)
    }
}

struct Pending {
    envelope: Envelope,
    pipes: Vec<PipeTarget>,
}

/// Publishes the terminal signal/event and runs registered continuations,
/// in registration order, after waking any `Wait()`-ers (spec §4.7).
async fn finish(future: FutureAddr, pending: Pending) {
    future.cancel_timer();
    let is_error = pending.envelope.is_error();
    *future.0.state.write() = if is_error {
        Signal::Rejected
    } else {
        Signal::Resolved
    };
    if is_error {
        future.0.watchers.publish(Event::FutureRejected(FutureRejected {
            id: future.id().to_string(),
        }));
    } else {
        future.0.watchers.publish(Event::FutureResolved(FutureResolved {
            data: pending.envelope.clone(),
            id: future.id().to_string(),
        }));
    }
    future.0.notify.notify_waiters();
    for target in pending.pipes {
        match target {
            PipeTarget::Callback(mut f) => f(pending.envelope.clone()),
            PipeTarget::Forward(addr) => {
                let _ = addr.forward(pending.envelope.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::DeadLetters;

    fn root() -> Addr {
        DeadLetters::standalone_for_test().addr()
    }

    #[tokio::test]
    async fn resolves_once_and_rejects_second_send() {
        let future = FutureAddr::new(root());
        future.send(7i32, root()).unwrap();
        tokio::task::yield_now().await;
        assert_eq!(future.wait().await, None);
        assert_eq!(future.result().unwrap().downcast_ref::<i32>(), Some(&7));
        assert_eq!(future.send(8i32, root()), Err(FutureError::FutureResolved));
    }

    #[tokio::test]
    async fn pipe_action_runs_immediately_after_resolution() {
        let future = FutureAddr::new(root());
        future.send(1i32, root()).unwrap();
        tokio::task::yield_now().await;
        let seen = Arc::new(Mutex::new(false));
        let seen_clone = seen.clone();
        future.pipe_action(move |_env| *seen_clone.lock() = true);
        assert!(*seen.lock());
    }

    #[tokio::test]
    async fn pipe_action_before_resolution_runs_exactly_once() {
        let future = FutureAddr::new(root());
        let count = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let count_clone = count.clone();
        future.pipe_action(move |_env| {
            count_clone.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });
        future.send(1i32, root()).unwrap();
        tokio::task::yield_now().await;
        assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn escalate_marks_rejected() {
        let future = FutureAddr::new(root());
        future.escalate("boom").await.unwrap();
        let err = future.wait().await;
        assert_eq!(err.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn new_timed_default_still_resolves_normally_before_its_deadline() {
        let future = FutureAddr::new_timed_default(root());
        future.send(1i32, root()).unwrap();
        tokio::task::yield_now().await;
        assert_eq!(future.wait().await, None);
    }
}
