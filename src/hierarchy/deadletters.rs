// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::actor::{ActorAddr, Behavior, BehaviorError};
use crate::addr::Addr;
use crate::events::Event;
use crate::message::Envelope;
use crate::system::prop::Prop;

/// Behavior backing the well-known dead-letters sink: every envelope it
/// receives is republished as [`Event::DeadLetter`] for any watcher, then
/// discarded (spec §4.6 "DeadLetters").
#[derive(Default)]
struct DeadLettersBehavior;

#[async_trait]
impl Behavior for DeadLettersBehavior {
    async fn action(&mut self, envelope: Envelope, self_addr: &Addr) -> Result<(), BehaviorError> {
        if let Addr::Actor(a) = self_addr {
            a.watchers().publish(Event::DeadLetter(envelope));
        }
        Ok(())
    }
}

/// Handle to a hierarchy's dead-letters sink (spec §4.6): a well-known,
/// per-hierarchy-root actor reachable from any node via
/// [`crate::actor::ActorAddr::parent`] when that node has no structural
/// parent.
pub struct DeadLetters(ActorAddr);

impl DeadLetters {
    /// Spawns a live dead-letters actor and starts its message pump. Used
    /// by [`crate::system::ancestor`] once per hierarchy.
    pub fn spawn_dead_letters() -> Self {
        let prop = Prop::new(|| Box::<DeadLettersBehavior>::default() as Box<dyn Behavior>)
            .with_namespace("local")
            .with_protocol("system");
        let addr = ActorAddr::new_unparented("dead-letters", &prop);
        addr.start();
        Self(addr)
    }

    /// Builds a dead-letters actor without starting its pump, for use
    /// purely as a dummy sender/root address in unit tests that never
    /// exercise delivery.
    pub fn standalone_for_test() -> Self {
        let prop = Prop::new(|| Box::<DeadLettersBehavior>::default() as Box<dyn Behavior>);
        Self(ActorAddr::new_unparented("dead-letters", &prop))
    }

    pub fn addr(&self) -> Addr {
        Addr::Actor(self.0.clone())
    }

    pub(crate) fn actor(&self) -> ActorAddr {
        self.0.clone()
    }
}
