//! In-process pub/sub for lifecycle signals (component C8).
//!
//! Each actor and each future owns one [`EventStream`]. Delivery is
//! best-effort within the publishing task: a slow subscriber never blocks
//! lifecycle progress because each subscription gets its own bounded
//! channel and a forwarding task, with drop-oldest overflow announced via
//! [`Event::Lost`].

mod signal;
mod stream;

pub use signal::{ActorSignal, Event, FutureRejected, FutureResolved};
pub use stream::{EventStream, Subscription};
