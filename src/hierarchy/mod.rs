//! Hierarchy & registry (component C6).
//!
//! Parent/child membership, `AddressOf`/`GetChild`/`GetAddr` resolution,
//! and the dead-letters sentinel are properties of [`crate::actor::ActorAddr`]
//! itself (spec §4.6) rather than a separate registry data structure — the
//! tree *is* the registry, each node storing only its own children. This
//! module supplies the one piece that doesn't belong to any single node:
//! the dead-letters sink.

mod deadletters;

pub use deadletters::DeadLetters;
