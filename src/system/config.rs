//! Ambient runtime configuration (logging, default mailbox sizing,
//! default timeouts) — not part of the spec's core component surface,
//! but every `Ancestor` bootstrap needs a place to hang these defaults.

// Layer 1: Standard library imports
use std::time::Duration;

const DEFAULT_MAILBOX_CAPACITY: usize = 1_000;
const DEFAULT_FUTURE_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_EVENT_BUFFER: usize = 64;

/// Process-wide defaults applied when a `Prop` or `TimedFuture` call
/// leaves a value unspecified.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Capacity used by `BoundedMailbox` when none is given explicitly.
    pub default_mailbox_capacity: usize,

    /// Deadline used by `TimedFuture` call sites that don't pass one.
    pub default_future_timeout: Duration,

    /// Per-subscriber event buffer capacity before drop-oldest kicks in.
    pub event_buffer_capacity: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            default_mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            default_future_timeout: DEFAULT_FUTURE_TIMEOUT,
            event_buffer_capacity: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl SystemConfig {
    pub fn builder() -> SystemConfigBuilder {
        SystemConfigBuilder::default()
    }

    /// Rejects nonsensical values before they reach a running system.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_mailbox_capacity == 0 {
            return Err("default_mailbox_capacity must be > 0".to_string());
        }
        if self.default_future_timeout.is_zero() {
            return Err("default_future_timeout must be > 0".to_string());
        }
        if self.event_buffer_capacity == 0 {
            return Err("event_buffer_capacity must be > 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SystemConfigBuilder {
    config: SystemConfig,
}

impl SystemConfigBuilder {
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.config.default_mailbox_capacity = capacity;
        self
    }

    pub fn with_future_timeout(mut self, timeout: Duration) -> Self {
        self.config.default_future_timeout = timeout;
        self
    }

    pub fn with_event_buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.event_buffer_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<SystemConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SystemConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = SystemConfig::builder()
            .with_mailbox_capacity(0)
            .build()
            .unwrap_err();
        assert!(err.contains("mailbox_capacity"));
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = SystemConfig::builder()
            .with_mailbox_capacity(42)
            .build()
            .unwrap();
        assert_eq!(config.default_mailbox_capacity, 42);
    }
}
