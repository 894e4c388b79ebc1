// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::errors::SpawnError;
use super::prop::Prop;
use crate::actor::ActorAddr;
use crate::addr::Addr;
use crate::hierarchy::DeadLetters;

/// Bootstraps a fresh actor hierarchy: a root actor under its own,
/// freshly spawned `DeadLetters` sink (spec §4.4 "Ancestor").
///
/// Each call builds an independent hierarchy — there is no process-wide
/// singleton root — mirroring the spec's framing of `Ancestor` as the
/// entry point an embedding application calls once per runtime instance
/// it wants, not a global.
pub fn ancestor(service: impl Into<String>, prop: Prop) -> Result<Addr, SpawnError> {
    let dead_letters = DeadLetters::spawn_dead_letters();
    let root = ActorAddr::new_under_dead_letters(service, dead_letters.actor(), &prop);
    root.start();
    Ok(Addr::Actor(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Behavior, BehaviorError};
    use async_trait::async_trait;

    #[derive(Default)]
    struct Noop;

    #[async_trait]
    impl Behavior for Noop {
        async fn action(
            &mut self,
            _envelope: crate::message::Envelope,
            _self_addr: &Addr,
        ) -> Result<(), BehaviorError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn ancestor_builds_a_running_root() {
        let prop = Prop::new(|| Box::<Noop>::default() as Box<dyn Behavior>);
        let root = ancestor("root", prop).unwrap();
        assert!(root.state().is_running());
    }
}
