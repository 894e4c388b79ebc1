// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU64, Ordering};

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Monotonic, read-mostly counters attached to an actor (spec §3
/// "Stat").
pub struct Stat {
    restart_count: AtomicU64,
    delivered_count: AtomicU64,
    last_restart: Mutex<Option<DateTime<Utc>>>,
    last_failure: Mutex<Option<DateTime<Utc>>>,
}

/// Point-in-time readout of [`Stat`], returned by `ActorAddr::stats`.
#[derive(Debug, Clone, Copy)]
pub struct StatSnapshot {
    pub restart_count: u64,
    pub delivered_count: u64,
    pub last_restart: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
}

impl Stat {
    pub fn new() -> Self {
        Self {
            restart_count: AtomicU64::new(0),
            delivered_count: AtomicU64::new(0),
            last_restart: Mutex::new(None),
            last_failure: Mutex::new(None),
        }
    }

    pub fn record_delivery(&self) {
        self.delivered_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_restart(&self) {
        self.restart_count.fetch_add(1, Ordering::Relaxed);
        *self.last_restart.lock() = Some(Utc::now());
    }

    pub fn record_failure(&self) {
        *self.last_failure.lock() = Some(Utc::now());
    }

    pub fn restart_count(&self) -> u64 {
        self.restart_count.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            restart_count: self.restart_count.load(Ordering::Relaxed),
            delivered_count: self.delivered_count.load(Ordering::Relaxed),
            last_restart: *self.last_restart.lock(),
            last_failure: *self.last_failure.lock(),
        }
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self::new()
    }
}
