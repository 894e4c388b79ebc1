// Layer 1: Standard library imports
use std::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::{Mutex as SyncMutex, RwLock};
use tokio::sync::Mutex as AsyncMutex;
use tracing::Instrument;

// Layer 3: Internal module imports
use super::behavior::Behavior;
use super::stats::{Stat, StatSnapshot};
use crate::addr::{Addr, AddrError};
use crate::events::{ActorSignal, Event, EventStream, Subscription};
use crate::mailbox::Mailbox;
use crate::message::{Envelope, Header};
use crate::signal::Signal;
use crate::supervisor::{Cause, Directive, PanicEvent, Supervisor, SupervisorInvoker};
use crate::system::prop::{BehaviorFactory, Prop};
use crate::system::SpawnError;
use crate::util::ActorId;

struct ChildEntry {
    service: String,
    addr: ActorAddr,
}

/// Terminal transition requested on an actor, tracked so the message
/// pump finalizes exactly once regardless of who requested it (spec §8
/// "Destroy after Destroy is a no-op").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitKind {
    Stop,
    Kill,
    Destroy,
}

impl ExitKind {
    fn pre_signal(self) -> Signal {
        match self {
            ExitKind::Stop => Signal::Stopping,
            ExitKind::Kill => Signal::Killing,
            ExitKind::Destroy => Signal::Destructing,
        }
    }

    fn post_signal(self) -> Signal {
        match self {
            ExitKind::Stop => Signal::Stopped,
            ExitKind::Kill => Signal::Killed,
            ExitKind::Destroy => Signal::Destroyed,
        }
    }
}

/// Shared state backing an [`ActorAddr`] (spec §3 "Actor").
pub(crate) struct ActorCell {
    id: ActorId,
    service: String,
    namespace: String,
    protocol: String,
    parent: RwLock<Option<ActorAddr>>,
    dead_letters: RwLock<Option<ActorAddr>>,
    children: RwLock<Vec<ChildEntry>>,
    mailbox: Arc<dyn Mailbox>,
    supervisor: Arc<dyn Supervisor>,
    invoker: Option<Arc<dyn SupervisorInvoker>>,
    behavior: AsyncMutex<Box<dyn Behavior>>,
    behavior_factory: BehaviorFactory,
    drain_on_restart: bool,
    state: RwLock<Signal>,
    stats: Stat,
    watchers: EventStream,
    pending_exit: SyncMutex<Option<ExitKind>>,
}

/// Handle through which one interacts with an actor (spec §4.2).
///
/// Cheaply `Clone`able: it is a thin wrapper over `Arc<ActorCell>`, the
/// same enum-with-shared-methods idiom the teacher uses for
/// `ActorAddress::{Named, Anonymous}`.
#[derive(Clone)]
pub struct ActorAddr(pub(crate) Arc<ActorCell>);

impl PartialEq for ActorAddr {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}
impl Eq for ActorAddr {}

impl std::fmt::Debug for ActorAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActorAddr({})", self.addr_string())
    }
}

impl ActorAddr {
    fn new(
        service: impl Into<String>,
        parent: Option<ActorAddr>,
        dead_letters: Option<ActorAddr>,
        prop: &Prop,
    ) -> Self {
        let behavior = (prop.behavior)();
        let mailbox = (prop.mailbox)();
        let cell = ActorCell {
            id: ActorId::new(),
            service: service.into(),
            namespace: prop.namespace.clone(),
            protocol: prop.protocol.clone(),
            parent: RwLock::new(parent),
            dead_letters: RwLock::new(dead_letters),
            children: RwLock::new(Vec::new()),
            mailbox,
            supervisor: prop.supervisor.clone(),
            invoker: prop.invoker.clone(),
            behavior: AsyncMutex::new(behavior),
            behavior_factory: prop.behavior.clone(),
            drain_on_restart: prop.drain_on_restart,
            state: RwLock::new(Signal::Running),
            stats: Stat::new(),
            watchers: EventStream::with_capacity(prop.event_buffer_capacity),
            pending_exit: SyncMutex::new(None),
        };
        Self(Arc::new(cell))
    }

    /// Builds the root of a fresh hierarchy, with no parent and no
    /// external dead-letters handle (used only by
    /// [`crate::hierarchy::DeadLetters`] to bootstrap itself). Does not
    /// start the message pump — callers that want a live root call
    /// [`ActorAddr::start`] explicitly.
    pub(crate) fn new_unparented(service: impl Into<String>, prop: &Prop) -> Self {
        Self::new(service, None, None, prop)
    }

    /// Builds a root actor under a known dead-letters sink (used by
    /// `Ancestor`). Does not start the message pump.
    pub(crate) fn new_under_dead_letters(
        service: impl Into<String>,
        dead_letters: ActorAddr,
        prop: &Prop,
    ) -> Self {
        Self::new(service, None, Some(dead_letters), prop)
    }

    /// Starts this actor's message pump. `Spawn` does this automatically
    /// for children; root actors (`DeadLetters`, `Ancestor`) call it
    /// explicitly once they're fully constructed.
    ///
    /// Wraps the pump in a `tracing` span carrying `actor_id`/`service`
    /// fields for the lifetime of the actor (spec §6 "ContextLogs",
    /// generalized here to a crate-wide subscriber rather than a
    /// per-actor logger factory).
    pub(crate) fn start(&self) {
        let span = tracing::info_span!("actor_pump", actor_id = %self.id(), service = %self.service());
        tokio::spawn(run_pump(self.clone()).instrument(span));
    }

    /// `Spawn(service, prop)` (spec §4.4).
    pub fn spawn(&self, service: impl Into<String>, prop: Prop) -> Result<Addr, SpawnError> {
        let child = ActorAddr::new(
            service,
            Some(self.clone()),
            Some(self.dead_letters_handle()),
            &prop,
        );
        self.0.children.write().push(ChildEntry {
            service: child.service().to_string(),
            addr: child.clone(),
        });
        child.start();
        Ok(Addr::Actor(child))
    }

    pub fn id(&self) -> ActorId {
        self.0.id
    }

    pub fn service(&self) -> &str {
        &self.0.service
    }

    pub fn namespace(&self) -> &str {
        &self.0.namespace
    }

    pub fn protocol(&self) -> &str {
        &self.0.protocol
    }

    pub fn state(&self) -> Signal {
        *self.0.state.read()
    }

    pub fn stats(&self) -> StatSnapshot {
        self.0.stats.snapshot()
    }

    pub(crate) fn parent_actor(&self) -> Option<ActorAddr> {
        self.0.parent.read().clone()
    }

    pub fn parent(&self) -> Addr {
        match self.parent_actor() {
            Some(p) => Addr::Actor(p),
            None => Addr::Actor(self.dead_letters_handle()),
        }
    }

    pub fn ancestor(&self) -> Addr {
        let mut current = self.clone();
        while let Some(p) = current.parent_actor() {
            current = p;
        }
        Addr::Actor(current)
    }

    pub(crate) fn dead_letters_handle(&self) -> ActorAddr {
        self.0
            .dead_letters
            .read()
            .clone()
            .unwrap_or_else(|| self.clone())
    }

    pub fn children(&self) -> Vec<Addr> {
        self.0
            .children
            .read()
            .iter()
            .map(|c| Addr::Actor(c.addr.clone()))
            .collect()
    }

    pub(crate) fn children_actor(&self) -> Vec<ActorAddr> {
        self.0.children.read().iter().map(|c| c.addr.clone()).collect()
    }

    fn find_child_by_service(&self, service: &str) -> Option<ActorAddr> {
        self.0
            .children
            .read()
            .iter()
            .find(|c| c.service == service)
            .map(|c| c.addr.clone())
    }

    /// `AddressOf(service, ancestry)` (spec §4.6).
    pub fn address_of(&self, service: &str, ancestry: bool) -> Result<Addr, AddrError> {
        if !ancestry {
            return self
                .find_child_by_service(service)
                .map(Addr::Actor)
                .ok_or(AddrError::NotFound);
        }
        let mut level = self.parent_actor();
        while let Some(parent) = level {
            if let Some(found) = parent.find_child_by_service(service) {
                return Ok(Addr::Actor(found));
            }
            level = parent.parent_actor();
        }
        Err(AddrError::NotFound)
    }

    /// `GetChild(id, subID…)` — walks the tree by id (spec §4.6).
    pub fn get_child(&self, ids: &[ActorId]) -> Result<Addr, AddrError> {
        let mut current = self.clone();
        for id in ids {
            let next = current
                .0
                .children
                .read()
                .iter()
                .find(|c| c.addr.id() == *id)
                .map(|c| c.addr.clone());
            match next {
                Some(n) => current = n,
                None => return Err(AddrError::NotFound),
            }
        }
        Ok(Addr::Actor(current))
    }

    fn path_segment(&self) -> String {
        format!("{}:{}", self.id(), self.service())
    }

    /// Structural string form (spec §3: `namespace://protocol/parentPath/id:service`).
    pub fn addr_string(&self) -> String {
        let mut segments = vec![self.path_segment()];
        let mut current = self.parent_actor();
        while let Some(p) = current {
            segments.push(p.path_segment());
            current = p.parent_actor();
        }
        segments.reverse();
        format!("{}://{}/{}", self.namespace(), self.protocol(), segments.join("/"))
    }

    /// `GetAddr(addr-string)` — reverses `addr_string` by walking the
    /// `id:service` segments down from the ancestor (spec §4.6).
    pub fn get_addr(&self, addr_string: &str) -> Result<Addr, AddrError> {
        let path = addr_string.split("://").nth(1).unwrap_or("");
        let mut parts = path.splitn(2, '/');
        let _protocol = parts.next();
        let rest = parts.next().unwrap_or("");
        let ids: Vec<ActorId> = rest
            .split('/')
            .filter(|s| !s.is_empty())
            .filter_map(|segment| segment.split(':').next())
            .filter_map(|id_str| id_str.parse().ok())
            .map(ActorId::from_uuid)
            .collect();
        let root = self.ancestor();
        match root {
            Addr::Actor(root) => {
                if ids.is_empty() {
                    Ok(Addr::Actor(root))
                } else {
                    root.get_child(&ids[1..])
                }
            }
            Addr::Future(_) => Err(AddrError::NotFound),
        }
    }

    /// `Send(data, sender)` (spec §4.2).
    pub fn send<T: Any + Send + Sync>(&self, data: T, sender: Addr) -> Result<(), AddrError> {
        self.forward(Envelope::new(sender, Header::new(), data))
    }

    pub fn send_with_header<T: Any + Send + Sync>(
        &self,
        data: T,
        header: Header,
        sender: Addr,
    ) -> Result<(), AddrError> {
        self.forward(Envelope::new(sender, header, data))
    }

    /// `Forward(envelope)` (spec §4.2).
    pub fn forward(&self, envelope: Envelope) -> Result<(), AddrError> {
        self.0.mailbox.push(envelope).map_err(|_| {
            AddrError::DeliveryError(format!(
                "actor {} unreachable or mailbox full",
                self.addr_string()
            ))
        })
    }

    /// `Watch(fn)` (spec §4.2, §4.8).
    pub fn watch<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(Event) + Send + 'static,
    {
        self.0.watchers.subscribe(callback)
    }

    pub(crate) fn watchers(&self) -> &EventStream {
        &self.0.watchers
    }

    /// `DeathWatch(addr)` — subscribes `self` to `target`'s terminal
    /// signals, delivered as a message to `self`'s own mailbox (spec
    /// §4.2).
    pub fn death_watch(&self, target: &Addr) -> Result<Subscription, AddrError> {
        let Addr::Actor(target_cell) = target else {
            return Err(AddrError::NotPossible);
        };
        let watcher = self.clone();
        let target_addr = target.clone();
        Ok(target_cell.0.watchers.subscribe(move |event| {
            if let Event::Actor(signal) = &event {
                if signal.signal.is_terminal() {
                    let _ = watcher.send(signal.clone(), target_addr.clone());
                }
            }
        }))
    }

    fn publish_signal(&self, signal: Signal) {
        *self.0.state.write() = signal;
        self.0
            .watchers
            .publish(Event::Actor(ActorSignal::new(signal, Addr::Actor(self.clone()))));
    }

    fn detach_from_parent(&self) {
        if let Some(parent) = self.parent_actor() {
            parent.0.children.write().retain(|c| c.addr.id() != self.id());
        }
    }

    async fn request_exit(&self, exit: ExitKind) {
        {
            let mut pending = self.0.pending_exit.lock();
            if pending.is_some() {
                return;
            }
            *pending = Some(exit);
        }
        self.publish_signal(exit.pre_signal());
        if matches!(exit, ExitKind::Kill | ExitKind::Destroy) {
            self.0.mailbox.drain();
        }
        self.0.mailbox.close();
    }

    /// Graceful shutdown: drains remaining envelopes before finalizing.
    pub async fn stop(&self) {
        self.request_exit(ExitKind::Stop).await;
    }

    /// Abrupt shutdown: discards remaining envelopes immediately.
    pub async fn kill(&self) {
        self.request_exit(ExitKind::Kill).await;
    }

    /// Terminal, recursive shutdown: kills descendants depth-first, then
    /// self (spec §4.4).
    pub async fn destroy(&self) {
        for child in self.children_actor() {
            Box::pin(child.destroy()).await;
        }
        self.request_exit(ExitKind::Destroy).await;
    }

    async fn finalize(&self, exit: ExitKind) {
        let self_addr = Addr::Actor(self.clone());
        {
            let mut behavior = self.0.behavior.lock().await;
            let hook = match exit {
                ExitKind::Stop => behavior.pre_stop(&self_addr).await,
                ExitKind::Kill => behavior.pre_kill(&self_addr).await,
                ExitKind::Destroy => Ok(()),
            };
            if let Err(err) = hook {
                tracing::warn!(actor = %self.addr_string(), %err, "lifecycle hook failed during shutdown");
            }
        }
        self.detach_from_parent();
        self.publish_signal(exit.post_signal());
    }

    async fn do_restart(&self, reason: &str) {
        self.publish_signal(Signal::Restarting);
        let self_addr = Addr::Actor(self.clone());
        let mut behavior = self.0.behavior.lock().await;
        if let Err(err) = behavior.pre_restart(reason, &self_addr).await {
            tracing::warn!(actor = %self.addr_string(), %err, "pre_restart hook failed");
        }
        if self.0.drain_on_restart {
            self.0.mailbox.drain();
        }
        *behavior = (self.0.behavior_factory)();
        if let Err(err) = behavior.post_restart(&self_addr).await {
            tracing::warn!(actor = %self.addr_string(), %err, "post_restart hook failed");
        }
        drop(behavior);
        self.0.stats.record_restart();
        self.publish_signal(Signal::Restarted);
        self.publish_signal(Signal::Running);
    }

    /// Decides and applies the outcome of a supervision decision (spec
    /// §4.5). Called by [`Supervisor`] implementations, either inline
    /// from the failing actor's own pump task (direct failure) or from
    /// a different actor's pump task (escalation / `AllForOne` fan-out).
    pub async fn apply_directive(&self, directive: Directive, cause: Cause) {
        let stat = self.0.stats.snapshot();
        match directive {
            Directive::Ignore | Directive::Panic => {}
            Directive::Stop => {
                self.request_exit(ExitKind::Stop).await;
                if let Some(invoker) = &self.0.invoker {
                    invoker.invoked_stop(&cause, stat, self).await;
                }
            }
            Directive::Kill => {
                self.request_exit(ExitKind::Kill).await;
                if let Some(invoker) = &self.0.invoker {
                    invoker.invoked_kill(&cause, stat, self).await;
                }
            }
            Directive::Destroy => {
                self.destroy().await;
                if let Some(invoker) = &self.0.invoker {
                    invoker.invoked_destroy(&cause, stat, self).await;
                }
            }
            Directive::Restart => {
                self.do_restart(&cause.description()).await;
                if let Some(invoker) = &self.0.invoker {
                    invoker.invoked_restart(&cause, stat, self).await;
                }
            }
            Directive::Escalate => match self.parent_actor() {
                Some(parent) => parent.receive_escalation(cause).await,
                None => {
                    tracing::error!(
                        actor = %self.addr_string(),
                        cause = %cause.description(),
                        "escalation reached the root with no parent; destroying subtree"
                    );
                    self.destroy().await;
                }
            },
        }
    }

    pub(crate) async fn receive_escalation(&self, cause: Cause) {
        let supervisor = self.0.supervisor.clone();
        let parent = self.parent_actor();
        supervisor.handle(cause, self, parent.as_ref()).await;
    }

    async fn route_error(&self, err: Arc<dyn StdError + Send + Sync>) {
        self.0.stats.record_failure();
        let supervisor = self.0.supervisor.clone();
        let parent = self.parent_actor();
        supervisor.handle(Cause::Error(err), self, parent.as_ref()).await;
    }

    async fn route_panic(&self, message: String, envelope: Option<Envelope>) {
        self.0.stats.record_failure();
        self.publish_signal(Signal::Paniced);
        let supervisor = self.0.supervisor.clone();
        let parent = self.parent_actor();
        supervisor
            .handle(Cause::Panic(PanicEvent::new(message, envelope)), self, parent.as_ref())
            .await;
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "actor panicked with a non-string payload".to_string()
    }
}

/// The sole message pump task for one actor (spec §4.4 "One logical
/// execution task per actor").
async fn run_pump(cell: ActorAddr) {
    let self_addr = Addr::Actor(cell.clone());
    {
        let mut behavior = cell.0.behavior.lock().await;
        if let Err(err) = behavior.post_start(&self_addr).await {
            drop(behavior);
            cell.route_error(Arc::from(err)).await;
        }
    }

    loop {
        let pending_exit = cell.0.pending_exit.lock().as_ref().copied();
        if let Some(exit) = pending_exit {
            cell.finalize(exit).await;
            return;
        }

        match cell.0.mailbox.recv().await {
            Some(envelope) => {
                cell.0.stats.record_delivery();
                let cell_for_task = cell.clone();
                let addr_for_task = self_addr.clone();
                let envelope_for_task = envelope.clone();
                let handle = tokio::spawn(async move {
                    let mut behavior = cell_for_task.0.behavior.lock().await;
                    behavior.action(envelope_for_task, &addr_for_task).await
                });
                match handle.await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => cell.route_error(Arc::from(err)).await,
                    Err(join_err) => {
                        let message = if join_err.is_panic() {
                            panic_message(join_err.into_panic())
                        } else {
                            "actor task was cancelled".to_string()
                        };
                        cell.route_panic(message, Some(envelope)).await;
                    }
                }
            }
            None => {
                let exit = cell.0.pending_exit.lock().as_ref().copied().unwrap_or(ExitKind::Stop);
                cell.finalize(exit).await;
                return;
            }
        }
    }
}
