//! Supervisor strategies (component C5): map `(cause, child, parent) →
//! directive` and apply it.

mod backoff;
mod directive;
mod invoker;
mod strategy;

pub use backoff::{exponential_delay, RestartBudget};
pub use directive::{Cause, Directive, PanicEvent};
pub use invoker::SupervisorInvoker;
pub use strategy::{AllForOne, Decider, ExponentialBackoffRestart, OneForOne, PanicAction, RestartingSupervisor, Supervisor};
