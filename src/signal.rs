//! Lifecycle `Signal` shared between actors and futures (spec §3).
//!
//! Kept as its own module (rather than nested under `actor` or `future`)
//! because both addressable kinds traverse the same state type — an
//! actor never reaches `RESOLVED`/`REJECTED` and a future never reaches
//! the shutdown/restart states, but both read and publish `Signal`.

use serde::{Deserialize, Serialize};

/// Current lifecycle state of an actor or a future.
///
/// See spec §4.4 for the actor state machine and §4.7 for the future's
/// use of `RESOLVED`/`REJECTED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    /// Actor is running and accepting messages.
    Running,
    /// Graceful shutdown in progress.
    Stopping,
    /// Graceful shutdown complete; terminal.
    Stopped,
    /// Abrupt shutdown in progress.
    Killing,
    /// Abrupt shutdown complete; terminal.
    Killed,
    /// Recursive, terminal teardown in progress.
    Destructing,
    /// Recursive, terminal teardown complete; terminal.
    Destroyed,
    /// Behavior panicked; awaiting supervisor decision.
    Paniced,
    /// Restart in progress: `PreRestart` running, behavior being replaced.
    Restarting,
    /// Restart just completed; about to resume as `Running`.
    Restarted,
    /// Future only: resolved with a non-error value.
    Resolved,
    /// Future only: resolved with an error value.
    Rejected,
}

impl Signal {
    /// Returns `true` for any of the three terminal actor states.
    pub fn is_terminal(self) -> bool {
        matches!(self, Signal::Stopped | Signal::Killed | Signal::Destroyed)
    }

    /// Returns `true` if the actor/future is usable for new sends.
    pub fn is_running(self) -> bool {
        matches!(self, Signal::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(Signal::Stopped.is_terminal());
        assert!(Signal::Killed.is_terminal());
        assert!(Signal::Destroyed.is_terminal());
        assert!(!Signal::Running.is_terminal());
        assert!(!Signal::Restarting.is_terminal());
    }

    #[test]
    fn running_state() {
        assert!(Signal::Running.is_running());
        assert!(!Signal::Paniced.is_running());
    }
}
