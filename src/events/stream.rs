// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tokio::sync::Notify;

// Layer 3: Internal module imports
use super::signal::Event;

struct Subscriber {
    id: u64,
    buffer: Arc<Mutex<VecDeque<Event>>>,
    notify: Arc<Notify>,
    dropped: Arc<AtomicU64>,
}

struct Inner {
    subscribers: Mutex<Vec<Subscriber>>,
    next_id: AtomicU64,
    capacity: usize,
}

/// An in-process pub/sub hub owned by a single actor or future.
///
/// `publish` never blocks on a slow subscriber: each subscription gets its
/// own bounded buffer drained by a dedicated forwarding task, so a stuck
/// callback can only starve itself, never the publisher or other
/// subscribers.
#[derive(Clone)]
pub struct EventStream(Arc<Inner>);

impl EventStream {
    /// Buffers each subscriber to `SystemConfig::default().event_buffer_capacity`
    /// (spec §4.8: "bounded per-subscriber buffer, drop-oldest on overflow").
    pub fn new() -> Self {
        Self::with_capacity(crate::system::SystemConfig::default().event_buffer_capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Arc::new(Inner {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
            capacity,
        }))
    }

    /// Registers `callback` to be invoked, in publish order, for every
    /// subsequent event. Returns a [`Subscription`] whose `stop` deregisters
    /// it.
    pub fn subscribe<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(Event) + Send + 'static,
    {
        let id = self.0.next_id.fetch_add(1, Ordering::Relaxed);
        let buffer = Arc::new(Mutex::new(VecDeque::new()));
        let notify = Arc::new(Notify::new());
        let dropped = Arc::new(AtomicU64::new(0));

        self.0.subscribers.lock().push(Subscriber {
            id,
            buffer: buffer.clone(),
            notify: notify.clone(),
            dropped: dropped.clone(),
        });

        tokio::spawn(async move {
            loop {
                notify.notified().await;
                loop {
                    let next = buffer.lock().pop_front();
                    match next {
                        Some(event) => callback(event),
                        None => break,
                    }
                }
                let lost = dropped.swap(0, Ordering::AcqRel);
                if lost > 0 {
                    callback(Event::Lost { dropped: lost });
                }
            }
        });

        Subscription {
            id,
            stream: Arc::downgrade(&self.0),
        }
    }

    /// Publishes `event` to every live subscriber, in registration order.
    pub fn publish(&self, event: Event) {
        let subscribers = self.0.subscribers.lock();
        for subscriber in subscribers.iter() {
            let mut buffer = subscriber.buffer.lock();
            if buffer.len() >= self.0.capacity {
                buffer.pop_front();
                subscriber.dropped.fetch_add(1, Ordering::AcqRel);
            }
            buffer.push_back(event.clone());
            drop(buffer);
            subscriber.notify.notify_one();
        }
    }

    /// Number of live subscriptions, for diagnostics and tests.
    pub fn subscriber_count(&self) -> usize {
        self.0.subscribers.lock().len()
    }
}

impl Default for EventStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn remove(&self, id: u64) {
        self.subscribers.lock().retain(|s| s.id != id);
    }
}

/// A live registration on an [`EventStream`]. Dropping this handle does
/// *not* unsubscribe — call [`Subscription::stop`] explicitly, matching
/// spec §4.8's `Subscription.Stop()` contract.
pub struct Subscription {
    id: u64,
    stream: Weak<Inner>,
}

impl Subscription {
    /// Deregisters the subscriber. No further events are delivered to it
    /// after this call returns.
    pub fn stop(&self) {
        if let Some(inner) = self.stream.upgrade() {
            inner.remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[tokio::test]
    async fn delivers_in_publish_order() {
        let stream = EventStream::new();
        let received: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
        let recv_clone = received.clone();
        let _sub = stream.subscribe(move |event| {
            if let Event::Lost { dropped } = event {
                recv_clone.lock().push(dropped);
            }
        });
        for i in 0..5u64 {
            stream.publish(Event::Lost { dropped: i });
            // Yield between publishes so each is drained (and re-emitted
            // by the subscriber as its own marker) before the next lands.
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(*received.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn stop_halts_delivery() {
        let stream = EventStream::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let sub = stream.subscribe(move |_event| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        stream.publish(Event::Lost { dropped: 0 });
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        sub.stop();
        stream.publish(Event::Lost { dropped: 0 });
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn overflow_drops_oldest_and_announces_loss() {
        let capacity = 8;
        let stream = EventStream::with_capacity(capacity);
        let lost_seen = Arc::new(AtomicUsize::new(0));
        let lost_clone = lost_seen.clone();
        let _sub = stream.subscribe(move |event| {
            if matches!(event, Event::Lost { .. }) {
                lost_clone.fetch_add(1, Ordering::SeqCst);
            }
        });
        // A current-thread runtime never polls the freshly spawned
        // forwarding task until this function yields, so every publish
        // below lands in the buffer before anything drains it.
        for i in 0..(capacity as u64 + 10) {
            stream.publish(Event::Lost { dropped: i });
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(lost_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn new_uses_system_config_default_capacity() {
        let stream = EventStream::new();
        assert_eq!(
            stream.0.capacity,
            crate::system::SystemConfig::default().event_buffer_capacity
        );
    }
}
