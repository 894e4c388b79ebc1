//! Ambient system wiring: spawn-time configuration (`Prop`), process-wide
//! defaults (`SystemConfig`), error aggregation, and the `Ancestor` entry
//! point that bootstraps a fresh hierarchy.

mod ancestor;
mod config;
mod errors;
pub mod prop;

pub use ancestor::ancestor;
pub use config::{SystemConfig, SystemConfigBuilder};
pub use errors::{RuntimeError, SpawnError};
pub use prop::Prop;
