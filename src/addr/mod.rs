//! Addr (component C2): the uniform handle type through which actors and
//! futures are reached (spec §4.2).

// Layer 1: Standard library imports
use std::any::Any;
use std::fmt;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
mod error;

pub use error::AddrError;

use crate::actor::ActorAddr;
use crate::events::{Event, Subscription};
use crate::future::FutureAddr;
use crate::message::{Envelope, Header};
use crate::signal::Signal;
use crate::system::prop::Prop;
use crate::system::SpawnError;
use crate::util::ActorId;

/// Either an actor or a future, addressed uniformly (spec §3 "Addr").
///
/// `Future` rejects the actor-only capabilities — `Spawn`, `AddressOf`,
/// `Children`, `GetChild`, `DeathWatch` — with a fixed "not possible"
/// failure rather than by narrowing the type at compile time, matching
/// the single-`Addr`-type contract the rest of the runtime is built
/// around (spec §4.6, §4.7).
#[derive(Clone)]
pub enum Addr {
    Actor(ActorAddr),
    Future(FutureAddr),
}

impl PartialEq for Addr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Addr::Actor(a), Addr::Actor(b)) => a == b,
            (Addr::Future(a), Addr::Future(b)) => a == b,
            _ => false,
        }
    }
}
impl Eq for Addr {}

impl fmt::Debug for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addr::Actor(a) => write!(f, "{a:?}"),
            Addr::Future(a) => write!(f, "{a:?}"),
        }
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr_string())
    }
}

impl Addr {
    /// Structural string form (spec §3). Futures don't participate in the
    /// `namespace://protocol/path` tree, so they render as a bare id.
    pub fn addr_string(&self) -> String {
        match self {
            Addr::Actor(a) => a.addr_string(),
            Addr::Future(f) => format!("future://{}", f.id()),
        }
    }

    pub fn state(&self) -> Signal {
        match self {
            Addr::Actor(a) => a.state(),
            Addr::Future(f) => f.state(),
        }
    }

    pub fn parent(&self) -> Addr {
        match self {
            Addr::Actor(a) => a.parent(),
            Addr::Future(f) => f.parent(),
        }
    }

    pub fn ancestor(&self) -> Addr {
        match self {
            Addr::Actor(a) => a.ancestor(),
            Addr::Future(f) => f.ancestor(),
        }
    }

    /// `Send(data, sender)` (spec §4.2). On a future this resolves it,
    /// surfacing [`AddrError::DeliveryError`] if already resolved.
    pub fn send<T: Any + Send + Sync>(&self, data: T, sender: Addr) -> Result<(), AddrError> {
        match self {
            Addr::Actor(a) => a.send(data, sender),
            Addr::Future(f) => f
                .send(data, sender)
                .map_err(|e| AddrError::DeliveryError(e.to_string())),
        }
    }

    pub fn send_with_header<T: Any + Send + Sync>(
        &self,
        data: T,
        header: Header,
        sender: Addr,
    ) -> Result<(), AddrError> {
        match self {
            Addr::Actor(a) => a.send_with_header(data, header, sender),
            Addr::Future(f) => f
                .send_with_header(data, header, sender)
                .map_err(|e| AddrError::DeliveryError(e.to_string())),
        }
    }

    /// `Forward(envelope)` (spec §4.2).
    pub fn forward(&self, envelope: Envelope) -> Result<(), AddrError> {
        match self {
            Addr::Actor(a) => a.forward(envelope),
            Addr::Future(f) => f
                .forward(envelope)
                .map_err(|e| AddrError::DeliveryError(e.to_string())),
        }
    }

    /// `Watch(fn)` (spec §4.2, §4.8).
    pub fn watch<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(Event) + Send + 'static,
    {
        match self {
            Addr::Actor(a) => a.watch(callback),
            Addr::Future(f) => f.watch(callback),
        }
    }

    /// `DeathWatch(addr)` (spec §4.2) — not possible on a future, which
    /// has no terminal actor signal to subscribe to.
    pub fn death_watch(&self, target: &Addr) -> Result<Subscription, AddrError> {
        match self {
            Addr::Actor(a) => a.death_watch(target),
            Addr::Future(_) => Err(AddrError::NotPossible),
        }
    }

    /// `Spawn(service, prop)` (spec §4.4) — not possible on a future.
    pub fn spawn(&self, service: impl Into<String>, prop: Prop) -> Result<Addr, SpawnError> {
        match self {
            Addr::Actor(a) => a.spawn(service, prop),
            Addr::Future(_) => Err(SpawnError::NotPossible),
        }
    }

    /// `Children()` (spec §4.6) — not possible on a future.
    pub fn children(&self) -> Result<Vec<Addr>, AddrError> {
        match self {
            Addr::Actor(a) => Ok(a.children()),
            Addr::Future(_) => Err(AddrError::NotPossible),
        }
    }

    /// `AddressOf(service, ancestry)` (spec §4.6) — not possible on a
    /// future.
    pub fn address_of(&self, service: &str, ancestry: bool) -> Result<Addr, AddrError> {
        match self {
            Addr::Actor(a) => a.address_of(service, ancestry),
            Addr::Future(_) => Err(AddrError::NotPossible),
        }
    }

    /// `GetChild(id, subID…)` (spec §4.6) — not possible on a future.
    pub fn get_child(&self, ids: &[ActorId]) -> Result<Addr, AddrError> {
        match self {
            Addr::Actor(a) => a.get_child(ids),
            Addr::Future(_) => Err(AddrError::NotPossible),
        }
    }

    /// Downcasts to the backing actor handle, if this is an actor address.
    pub fn as_actor(&self) -> Option<&ActorAddr> {
        match self {
            Addr::Actor(a) => Some(a),
            Addr::Future(_) => None,
        }
    }

    /// Downcasts to the backing future handle, if this is a future address.
    pub fn as_future(&self) -> Option<&FutureAddr> {
        match self {
            Addr::Future(f) => Some(f),
            Addr::Actor(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::DeadLetters;

    #[test]
    fn future_rejects_actor_only_capabilities() {
        let root = DeadLetters::standalone_for_test().addr();
        let future = Addr::Future(FutureAddr::new(root));
        assert_eq!(future.children(), Err(AddrError::NotPossible));
        assert_eq!(future.address_of("x", false), Err(AddrError::NotPossible));
        assert_eq!(future.get_child(&[]), Err(AddrError::NotPossible));
        assert!(matches!(future.spawn("x", Prop::new(|| unreachable!())), Err(SpawnError::NotPossible)));
    }
}
