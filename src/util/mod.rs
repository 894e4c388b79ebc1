//! Identity primitives shared across the crate.

mod ids;

pub use ids::{ActorId, FutureId};
