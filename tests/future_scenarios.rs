use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use hive_rt::prelude::*;

struct Noop;

#[async_trait::async_trait]
impl Behavior for Noop {
    async fn action(&mut self, _envelope: Envelope, _self_addr: &Addr) -> Result<(), BehaviorError> {
        Ok(())
    }
}

fn root() -> Addr {
    ancestor("root", Prop::new(|| Box::new(Noop) as Box<dyn Behavior>)).unwrap()
}

#[tokio::test]
async fn timed_future_auto_rejects_on_deadline() {
    let future = FutureAddr::new_timed(root(), Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(60)).await;

    assert_eq!(future.state(), Signal::Rejected);
    let description = future.wait().await;
    assert!(description.unwrap().contains("timed out"));
}

#[tokio::test]
async fn timed_future_cancels_timer_on_early_resolution() {
    let future = FutureAddr::new_timed(root(), Duration::from_millis(200));
    future.send(42i32, root()).unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(future.state(), Signal::Resolved);
    assert_eq!(future.result().unwrap().downcast_ref::<i32>(), Some(&42));
}

#[tokio::test]
async fn pipe_registered_before_and_after_resolution_both_fire_once() {
    let future = FutureAddr::new(root());
    let before_count = Arc::new(AtomicUsize::new(0));
    let before_clone = before_count.clone();
    future.pipe_action(move |_env| {
        before_clone.fetch_add(1, Ordering::SeqCst);
    });

    future.send(1i32, root()).unwrap();
    tokio::task::yield_now().await;

    let after_count = Arc::new(AtomicUsize::new(0));
    let after_clone = after_count.clone();
    future.pipe_action(move |_env| {
        after_clone.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(before_count.load(Ordering::SeqCst), 1);
    assert_eq!(after_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn pipe_forwards_resolved_envelope_to_target_actor() {
    let received: Arc<Mutex<Vec<i32>>> = Arc::new(Mutex::new(Vec::new()));
    let received_clone = received.clone();

    struct Recorder(Arc<Mutex<Vec<i32>>>);

    #[async_trait::async_trait]
    impl Behavior for Recorder {
        async fn action(
            &mut self,
            envelope: Envelope,
            _self_addr: &Addr,
        ) -> Result<(), BehaviorError> {
            if let Some(n) = envelope.downcast_ref::<i32>() {
                self.0.lock().push(*n);
            }
            Ok(())
        }
    }

    let root_addr = root();
    let target = root_addr
        .spawn(
            "target",
            Prop::new(move || Box::new(Recorder(received_clone.clone())) as Box<dyn Behavior>),
        )
        .unwrap();

    let future = FutureAddr::new(root_addr.clone());
    future.pipe(target);
    future.send(9i32, root_addr).unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(*received.lock(), vec![9]);
}
