// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use tracing::Span;

// Layer 3: Internal module imports
use crate::actor::Behavior;
use crate::addr::Addr;
use crate::mailbox::{BoundedMailbox, Mailbox, UnboundedMailbox};
use crate::supervisor::{RestartingSupervisor, Supervisor, SupervisorInvoker};
use crate::system::SystemConfig;

/// Factory for a fresh [`Behavior`] instance, invoked at spawn time and
/// again on every `Restart` (spec §4.4 "replace behavior state using the
/// `Prop` factory").
pub type BehaviorFactory = Arc<dyn Fn() -> Box<dyn Behavior> + Send + Sync>;

/// Factory for a fresh [`Mailbox`], invoked once at spawn time.
pub type MailboxFactory = Arc<dyn Fn() -> Arc<dyn Mailbox> + Send + Sync>;

/// Per-actor logger factory, keyed by the actor's own address (spec §6
/// "ContextLogs").
pub type ContextLogsFactory = Arc<dyn Fn(&Addr) -> Span + Send + Sync>;

/// Spawn-time configuration for one actor (spec §6 "Prop (configuration)").
///
/// Fluent builder in the style of the teacher's `ActorSpawnBuilder`, but
/// producing a value consumed once by `Spawn` rather than holding a live
/// system handle.
#[derive(Clone)]
pub struct Prop {
    pub(crate) behavior: BehaviorFactory,
    pub(crate) supervisor: Arc<dyn Supervisor>,
    pub(crate) mailbox: MailboxFactory,
    pub(crate) context_logs: Option<ContextLogsFactory>,
    pub(crate) invoker: Option<Arc<dyn SupervisorInvoker>>,
    pub(crate) drain_on_restart: bool,
    pub(crate) namespace: String,
    pub(crate) protocol: String,
    pub(crate) event_buffer_capacity: usize,
}

impl Prop {
    /// Builds a `Prop` around a behavior factory. All other fields take
    /// their spec-mandated defaults: `RestartingSupervisor`, unbounded
    /// mailbox, retain-on-restart, and an event buffer sized from
    /// [`SystemConfig::default`] (spec §7.2 "crate-wide defaults").
    pub fn new<F>(behavior: F) -> Self
    where
        F: Fn() -> Box<dyn Behavior> + Send + Sync + 'static,
    {
        Self {
            behavior: Arc::new(behavior),
            supervisor: Arc::new(RestartingSupervisor::new()),
            mailbox: Arc::new(|| Arc::new(UnboundedMailbox::new())),
            context_logs: None,
            invoker: None,
            drain_on_restart: false,
            namespace: "local".to_string(),
            protocol: "actor".to_string(),
            event_buffer_capacity: SystemConfig::default().event_buffer_capacity,
        }
    }

    pub fn with_supervisor(mut self, supervisor: Arc<dyn Supervisor>) -> Self {
        self.supervisor = supervisor;
        self
    }

    pub fn with_mailbox<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn Mailbox> + Send + Sync + 'static,
    {
        self.mailbox = Arc::new(factory);
        self
    }

    pub fn with_context_logs<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Addr) -> Span + Send + Sync + 'static,
    {
        self.context_logs = Some(Arc::new(factory));
        self
    }

    /// Registers an observability hook notified every time a supervisor
    /// actually applies a directive to this actor (spec §6 "Invoker").
    pub fn with_invoker(mut self, invoker: Arc<dyn SupervisorInvoker>) -> Self {
        self.invoker = Some(invoker);
        self
    }

    /// Overrides the spec's stated default (retain) to clear the mailbox
    /// on `Restart` instead.
    pub fn with_drain_on_restart(mut self, drain: bool) -> Self {
        self.drain_on_restart = drain;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Overrides the per-subscriber event buffer capacity used by this
    /// actor's watch stream, in place of `SystemConfig::default()`'s.
    pub fn with_event_buffer_capacity(mut self, capacity: usize) -> Self {
        self.event_buffer_capacity = capacity;
        self
    }

    /// Swaps in a `BoundedMailbox` sized from `SystemConfig`'s
    /// `default_mailbox_capacity` (spec §7.2 "crate-wide defaults"), in
    /// place of the spec default's unbounded queue.
    pub fn with_default_bounded_mailbox(self) -> Self {
        let capacity = SystemConfig::default().default_mailbox_capacity;
        self.with_mailbox(move || Arc::new(BoundedMailbox::new(capacity)) as Arc<dyn Mailbox>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Behavior, BehaviorError};
    use crate::message::Envelope;
    use async_trait::async_trait;

    #[derive(Default)]
    struct Noop;

    #[async_trait]
    impl Behavior for Noop {
        async fn action(&mut self, _envelope: Envelope, _self_addr: &Addr) -> Result<(), BehaviorError> {
            Ok(())
        }
    }

    #[test]
    fn new_sources_its_event_buffer_capacity_from_system_config() {
        let prop = Prop::new(|| Box::<Noop>::default() as Box<dyn Behavior>);
        assert_eq!(
            prop.event_buffer_capacity,
            SystemConfig::default().event_buffer_capacity
        );
    }

    #[test]
    fn with_event_buffer_capacity_overrides_the_default() {
        let prop = Prop::new(|| Box::<Noop>::default() as Box<dyn Behavior>)
            .with_event_buffer_capacity(8);
        assert_eq!(prop.event_buffer_capacity, 8);
    }

    #[test]
    fn with_default_bounded_mailbox_rejects_past_system_config_capacity() {
        use crate::hierarchy::DeadLetters;
        use crate::mailbox::MailboxError;
        use crate::message::Header;

        let prop = Prop::new(|| Box::<Noop>::default() as Box<dyn Behavior>)
            .with_default_bounded_mailbox();
        let mailbox = (prop.mailbox)();
        let sender = DeadLetters::standalone_for_test().addr();
        let capacity = SystemConfig::default().default_mailbox_capacity;
        for _ in 0..capacity {
            mailbox
                .push(Envelope::new(sender.clone(), Header::new(), 1i32))
                .unwrap();
        }
        assert_eq!(
            mailbox.push(Envelope::new(sender, Header::new(), 1i32)),
            Err(MailboxError::Full)
        );
    }
}
