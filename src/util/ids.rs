// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

/// Globally unique identifier for an actor.
///
/// Backed by a UUID v4, following the teacher runtime's choice of a
/// random, collision-resistant identifier rather than a sequence counter
/// that would need cross-task coordination.
///
/// # Examples
///
/// ```rust
/// use hive_rt::util::ActorId;
///
/// let a = ActorId::new();
/// let b = ActorId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Generates a new random actor id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Rebuilds an id from a UUID parsed out of an address string (spec
    /// §4.6 "GetAddr").
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Globally unique identifier for a future.
///
/// Distinct type from [`ActorId`] even though both wrap a UUID: futures
/// and actors are disjoint address kinds (spec §3) and keeping separate
/// newtypes prevents accidentally mixing the two at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FutureId(Uuid);

impl FutureId {
    /// Generates a new random future id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FutureId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FutureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_ids_are_unique() {
        assert_ne!(ActorId::new(), ActorId::new());
    }

    #[test]
    fn future_ids_are_unique() {
        assert_ne!(FutureId::new(), FutureId::new());
    }

    #[test]
    fn actor_id_display_is_nonempty() {
        assert!(!ActorId::new().to_string().is_empty());
    }
}
