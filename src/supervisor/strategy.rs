// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

// Layer 3: Internal module imports
use super::backoff::{exponential_delay, RestartBudget};
use super::directive::{Cause, Directive};
use crate::actor::ActorAddr;
use crate::util::ActorId;

/// Maps `(cause, child, parent) → directive` and applies it (spec §4.5).
#[async_trait]
pub trait Supervisor: Send + Sync {
    async fn handle(&self, cause: Cause, target: &ActorAddr, parent: Option<&ActorAddr>);
}

/// Side-effect hook invoked before a strategy acts on a panic, and the
/// pure decision function consulted for every cause (spec §4.5, §6
/// "SupervisorInvoker interface" folded into these two closures rather
/// than a separate trait object per strategy).
pub type Decider = Arc<dyn Fn(&Cause) -> Directive + Send + Sync>;
pub type PanicAction = Arc<dyn Fn(&Cause, &ActorAddr) + Send + Sync>;

fn default_decider() -> Decider {
    Arc::new(|cause| match cause {
        Cause::Panic(_) => Directive::Restart,
        Cause::Error(_) => Directive::Restart,
    })
}

/// Acts only on the failed child (spec §4.5 "OneForOne").
pub struct OneForOne {
    max: u32,
    window: Duration,
    decider: Decider,
    panic_action: Option<PanicAction>,
    budgets: DashMap<ActorId, Mutex<RestartBudget>>,
}

impl OneForOne {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            max,
            window,
            decider: default_decider(),
            panic_action: None,
            budgets: DashMap::new(),
        }
    }

    pub fn with_decider(mut self, decider: Decider) -> Self {
        self.decider = decider;
        self
    }

    pub fn with_panic_action(mut self, action: PanicAction) -> Self {
        self.panic_action = Some(action);
        self
    }

    fn decide_with_budget(&self, id: ActorId, cause: &Cause) -> Directive {
        let mut directive = (self.decider)(cause);
        if directive == Directive::Restart {
            let entry = self
                .budgets
                .entry(id)
                .or_insert_with(|| Mutex::new(RestartBudget::new(self.max, self.window)));
            let mut budget = entry.lock();
            budget.record_restart();
            if budget.is_exceeded() {
                directive = Directive::Escalate;
            }
        }
        directive
    }
}

#[async_trait]
impl Supervisor for OneForOne {
    async fn handle(&self, cause: Cause, target: &ActorAddr, _parent: Option<&ActorAddr>) {
        if let Some(action) = &self.panic_action {
            if matches!(cause, Cause::Panic(_)) {
                action(&cause, target);
            }
        }
        let directive = self.decide_with_budget(target.id(), &cause);
        target.apply_directive(directive, cause).await;
    }
}

/// Applies the directive uniformly to the failing child and all its
/// siblings under the same parent (spec §4.5 "AllForOne").
pub struct AllForOne {
    max: u32,
    window: Duration,
    decider: Decider,
    panic_action: Option<PanicAction>,
    budgets: DashMap<ActorId, Mutex<RestartBudget>>,
}

impl AllForOne {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            max,
            window,
            decider: default_decider(),
            panic_action: None,
            budgets: DashMap::new(),
        }
    }

    pub fn with_decider(mut self, decider: Decider) -> Self {
        self.decider = decider;
        self
    }

    pub fn with_panic_action(mut self, action: PanicAction) -> Self {
        self.panic_action = Some(action);
        self
    }

    fn decide_with_budget(&self, id: ActorId, decided: Directive) -> Directive {
        if decided != Directive::Restart {
            return decided;
        }
        let entry = self
            .budgets
            .entry(id)
            .or_insert_with(|| Mutex::new(RestartBudget::new(self.max, self.window)));
        let mut budget = entry.lock();
        budget.record_restart();
        if budget.is_exceeded() {
            Directive::Escalate
        } else {
            Directive::Restart
        }
    }
}

#[async_trait]
impl Supervisor for AllForOne {
    async fn handle(&self, cause: Cause, target: &ActorAddr, parent: Option<&ActorAddr>) {
        if let Some(action) = &self.panic_action {
            if matches!(cause, Cause::Panic(_)) {
                action(&cause, target);
            }
        }
        let base_directive = (self.decider)(&cause);
        let target_directive = self.decide_with_budget(target.id(), base_directive);
        target.apply_directive(target_directive, cause.clone()).await;

        if let Some(parent) = parent {
            for sibling in parent.children_actor() {
                if sibling.id() == target.id() {
                    continue;
                }
                let sibling_directive = self.decide_with_budget(sibling.id(), base_directive);
                sibling.apply_directive(sibling_directive, cause.clone()).await;
            }
        }
    }
}

/// Always restarts; no budget, no decider (spec §4.5).
pub struct RestartingSupervisor;

impl RestartingSupervisor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RestartingSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Supervisor for RestartingSupervisor {
    async fn handle(&self, cause: Cause, target: &ActorAddr, _parent: Option<&ActorAddr>) {
        target.apply_directive(Directive::Restart, cause).await;
    }
}

/// Restarts with exponentially increasing delay; destroys and escalates
/// after `max_restarts` (spec §4.5).
pub struct ExponentialBackoffRestart {
    max_restarts: u32,
    base_delay: Duration,
    ceiling: Option<Duration>,
    attempts: DashMap<ActorId, Mutex<u32>>,
}

impl ExponentialBackoffRestart {
    pub fn new(max_restarts: u32, base_delay: Duration, ceiling: Option<Duration>) -> Self {
        Self {
            max_restarts,
            base_delay,
            ceiling,
            attempts: DashMap::new(),
        }
    }
}

#[async_trait]
impl Supervisor for ExponentialBackoffRestart {
    async fn handle(&self, cause: Cause, target: &ActorAddr, _parent: Option<&ActorAddr>) {
        let entry = self.attempts.entry(target.id()).or_insert_with(|| Mutex::new(0));
        let attempt = {
            let mut guard = entry.lock();
            let current = *guard;
            *guard += 1;
            current
        };

        if attempt >= self.max_restarts {
            target.destroy().await;
            target.apply_directive(Directive::Escalate, cause).await;
            return;
        }

        let delay = exponential_delay(attempt, self.base_delay, self.ceiling);
        tokio::time::sleep(delay).await;
        target.apply_directive(Directive::Restart, cause).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_for_one_exceeds_budget_after_max() {
        let strategy = OneForOne::new(2, Duration::from_secs(60));
        let id = ActorId::new();
        assert_eq!(strategy.decide_with_budget(id, &Cause::Panic(super::super::directive::PanicEvent::new("boom", None))), Directive::Restart);
        assert_eq!(strategy.decide_with_budget(id, &Cause::Panic(super::super::directive::PanicEvent::new("boom", None))), Directive::Escalate);
    }
}
