// Layer 2: Third-party crate imports
use tracing::Span;

// Layer 3: Internal module imports
use crate::addr::Addr;

/// Per-actor logging context built from `Prop::context_logs` (spec §6
/// "ContextLogs — logger factory keyed by actor").
///
/// Kept separate from [`super::Behavior::action`]'s `self_addr` parameter
/// because logging is an ambient concern of the message pump, not part
/// of the behavior's own public contract.
#[derive(Clone)]
pub struct ActorContext {
    addr: Addr,
    span: Span,
}

impl ActorContext {
    pub fn new(addr: Addr) -> Self {
        let span = tracing::info_span!("actor", addr = %addr);
        Self { addr, span }
    }

    pub fn addr(&self) -> &Addr {
        &self.addr
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::DeadLetters;

    #[test]
    fn context_carries_the_address_it_was_built_from() {
        let addr = DeadLetters::standalone_for_test().addr();
        let ctx = ActorContext::new(addr.clone());
        assert_eq!(ctx.addr(), &addr);
    }
}
