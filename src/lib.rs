//! Actor runtime providing isolated, concurrently-running actors that
//! communicate exclusively through asynchronous message passing,
//! organized into supervision hierarchies that contain and recover from
//! failures without the failure propagating past the point it's handled.
//!
//! The runtime is built from eight parts: envelopes and headers
//! ([`message`]), the uniform actor/future handle ([`addr`]), per-actor
//! inboxes ([`mailbox`]), the actor lifecycle and message pump
//! ([`actor`]), supervision strategies ([`supervisor`]), the parent/child
//! tree and dead-letters sink ([`hierarchy`]), addressable one-shot
//! futures ([`future`]), and the lifecycle/event stream
//! ([`events`], [`signal`]). [`system`] wires these into a running
//! hierarchy via [`system::ancestor`].

pub mod actor;
pub mod addr;
pub mod events;
pub mod future;
pub mod hierarchy;
pub mod mailbox;
pub mod message;
pub mod prelude;
pub mod signal;
pub mod supervisor;
pub mod system;
pub mod util;
