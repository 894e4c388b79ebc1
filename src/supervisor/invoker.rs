// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::directive::Cause;
use crate::actor::{ActorAddr, StatSnapshot};

/// Observability hook invoked whenever [`super::Supervisor`] actually
/// applies a directive to an actor (spec §6 "SupervisorInvoker
/// interface"). All four methods default to no-ops so a `Prop` without an
/// `Invoker` pays nothing for this.
///
/// The spec's `Invoked*(cause, stat, addr, target)` signature names both
/// the invoker's own address and the supervised target; this runtime has
/// no separate addressable invoker object, so `target` alone stands in
/// for both.
#[async_trait]
pub trait SupervisorInvoker: Send + Sync {
    async fn invoked_stop(&self, _cause: &Cause, _stat: StatSnapshot, _target: &ActorAddr) {}
    async fn invoked_kill(&self, _cause: &Cause, _stat: StatSnapshot, _target: &ActorAddr) {}
    async fn invoked_destroy(&self, _cause: &Cause, _stat: StatSnapshot, _target: &ActorAddr) {}
    async fn invoked_restart(&self, _cause: &Cause, _stat: StatSnapshot, _target: &ActorAddr) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Recorder(Arc<Mutex<Vec<&'static str>>>);

    #[async_trait]
    impl SupervisorInvoker for Recorder {
        async fn invoked_stop(&self, _cause: &Cause, _stat: StatSnapshot, _target: &ActorAddr) {
            self.0.lock().push("stop");
        }
        async fn invoked_restart(&self, _cause: &Cause, _stat: StatSnapshot, _target: &ActorAddr) {
            self.0.lock().push("restart");
        }
    }

    #[test]
    fn unimplemented_hooks_default_to_no_ops() {
        // Compile-time check: a partial impl is still object-safe and usable.
        let log = Arc::new(Mutex::new(Vec::new()));
        let _invoker: Arc<dyn SupervisorInvoker> = Arc::new(Recorder(log));
    }
}
