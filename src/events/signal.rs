// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};

// Layer 3: Internal module imports
use crate::addr::Addr;
use crate::message::Envelope;
use crate::signal::Signal;

/// Lifecycle transition published by an actor, before and after effectful
/// work (spec §4.4: "Each transition publishes an `ActorSignal` ... before
/// and after effectful work").
#[derive(Debug, Clone)]
pub struct ActorSignal {
    pub signal: Signal,
    pub addr: Addr,
    pub time: DateTime<Utc>,
}

impl ActorSignal {
    pub fn new(signal: Signal, addr: Addr) -> Self {
        Self {
            signal,
            addr,
            time: Utc::now(),
        }
    }
}

/// Published when a future resolves without an error (spec §4.7).
#[derive(Debug, Clone)]
pub struct FutureResolved {
    pub data: Envelope,
    pub id: String,
}

/// Published when a future resolves with an error, or auto-escalates on
/// timeout (spec §4.7).
#[derive(Debug, Clone)]
pub struct FutureRejected {
    pub id: String,
}

/// Sum type of everything an [`super::EventStream`] can carry.
///
/// Custom, non-lifecycle events (`Behavior`-published application events)
/// are carried as `Custom`, matching spec §4.8's "multiplexes lifecycle
/// signals and custom events".
#[derive(Debug, Clone)]
pub enum Event {
    Actor(ActorSignal),
    FutureResolved(FutureResolved),
    FutureRejected(FutureRejected),
    DeadLetter(Envelope),
    /// A subscriber's buffer overflowed and `dropped` events were
    /// discarded before this one (spec §4.8 "announce drops by a `Lost`
    /// event").
    Lost { dropped: u64 },
    Custom(std::sync::Arc<dyn std::any::Any + Send + Sync>),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Actor(sig) => write!(f, "ActorSignal({:?})", sig.signal),
            Event::FutureResolved(_) => write!(f, "FutureResolved"),
            Event::FutureRejected(_) => write!(f, "FutureRejected"),
            Event::DeadLetter(_) => write!(f, "DeadLetter"),
            Event::Lost { dropped } => write!(f, "Lost({dropped})"),
            Event::Custom(_) => write!(f, "Custom"),
        }
    }
}
