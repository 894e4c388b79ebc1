// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};

/// Sliding-window restart budget shared by `OneForOne` and `AllForOne`
/// (spec §4.5 "Restart budget accounting. Each actor maintains
/// `restartCount` and `restartWindowStart`").
///
/// # Examples
///
/// ```rust
/// use hive_rt::supervisor::RestartBudget;
/// use std::time::Duration;
///
/// let mut budget = RestartBudget::new(3, Duration::from_secs(60));
/// assert!(!budget.is_exceeded());
/// for _ in 0..3 {
///     budget.record_restart();
/// }
/// assert!(budget.is_exceeded());
/// ```
#[derive(Debug, Clone)]
pub struct RestartBudget {
    max_restarts: u32,
    window: Duration,
    history: VecDeque<DateTime<Utc>>,
}

impl RestartBudget {
    pub fn new(max_restarts: u32, window: Duration) -> Self {
        Self {
            max_restarts,
            window,
            history: VecDeque::new(),
        }
    }

    /// Records a restart at the current time.
    pub fn record_restart(&mut self) {
        self.history.push_front(Utc::now());
    }

    /// Whether the number of restarts within the window has reached
    /// `max_restarts` — the `Decider`'s cue to promote `Restart` to
    /// `Escalate` (spec §4.5).
    pub fn is_exceeded(&mut self) -> bool {
        self.cleanup_expired();
        self.history.len() >= self.max_restarts as usize
    }

    /// Restart count within the current window.
    pub fn restart_count(&mut self) -> u32 {
        self.cleanup_expired();
        self.history.len() as u32
    }

    /// Resets the window, e.g. when a `Decider` judges the failure
    /// unrelated to prior ones.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    fn cleanup_expired(&mut self) {
        let Ok(window) = chrono::Duration::from_std(self.window) else {
            return;
        };
        let cutoff = Utc::now() - window;
        while matches!(self.history.back(), Some(ts) if *ts < cutoff) {
            self.history.pop_back();
        }
    }
}

/// Delay before restart attempt `n` under `ExponentialBackoffRestart`:
/// `min(base_delay * 2^n, ceiling)` (spec §4.5).
///
/// # Examples
///
/// ```rust
/// use hive_rt::supervisor::exponential_delay;
/// use std::time::Duration;
///
/// let base = Duration::from_millis(100);
/// assert_eq!(exponential_delay(0, base, None), Duration::from_millis(100));
/// assert_eq!(exponential_delay(1, base, None), Duration::from_millis(200));
/// assert_eq!(exponential_delay(3, base, Some(Duration::from_millis(500))), Duration::from_millis(500));
/// ```
pub fn exponential_delay(attempt: u32, base_delay: Duration, ceiling: Option<Duration>) -> Duration {
    let capped_attempt = attempt.min(32);
    let multiplier = 2u64.saturating_pow(capped_attempt);
    let delay = Duration::from_millis(base_delay.as_millis() as u64 * multiplier);
    match ceiling {
        Some(ceiling) => delay.min(ceiling),
        None => delay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_not_exceeded_below_max() {
        let mut budget = RestartBudget::new(3, Duration::from_secs(60));
        budget.record_restart();
        budget.record_restart();
        assert!(!budget.is_exceeded());
    }

    #[test]
    fn budget_exceeded_at_max() {
        let mut budget = RestartBudget::new(2, Duration::from_secs(60));
        budget.record_restart();
        budget.record_restart();
        assert!(budget.is_exceeded());
    }

    #[test]
    fn reset_clears_history() {
        let mut budget = RestartBudget::new(1, Duration::from_secs(60));
        budget.record_restart();
        assert!(budget.is_exceeded());
        budget.reset();
        assert!(!budget.is_exceeded());
    }

    #[test]
    fn exponential_delay_doubles_and_caps() {
        let base = Duration::from_millis(100);
        assert_eq!(exponential_delay(0, base, None), Duration::from_millis(100));
        assert_eq!(exponential_delay(2, base, None), Duration::from_millis(400));
        assert_eq!(
            exponential_delay(10, base, Some(Duration::from_secs(1))),
            Duration::from_secs(1)
        );
    }
}
