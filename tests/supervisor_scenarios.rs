use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use hive_rt::prelude::*;

struct Ping;

struct PanicsOnAction;

#[async_trait]
impl Behavior for PanicsOnAction {
    async fn action(&mut self, _envelope: Envelope, _self_addr: &Addr) -> Result<(), BehaviorError> {
        panic!("boom");
    }
}

struct AlwaysFails;

#[async_trait]
impl Behavior for AlwaysFails {
    async fn action(&mut self, _envelope: Envelope, _self_addr: &Addr) -> Result<(), BehaviorError> {
        Err("always fails".into())
    }
}

fn signal_log() -> (Arc<Mutex<Vec<Signal>>>, impl FnMut(Event) + Send + 'static) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    let callback = move |event: Event| {
        if let Event::Actor(sig) = event {
            log_clone.lock().push(sig.signal);
        }
    };
    (log, callback)
}

#[tokio::test]
async fn restarting_supervisor_recovers_from_panic() {
    let root = ancestor("root", Prop::new(|| Box::new(PanicsOnAction) as Box<dyn Behavior>)).unwrap();
    let actor = root
        .spawn(
            "child",
            Prop::new(|| Box::new(PanicsOnAction) as Box<dyn Behavior>)
                .with_supervisor(Arc::new(RestartingSupervisor::new())),
        )
        .unwrap();

    let (log, callback) = signal_log();
    let _sub = actor.watch(callback);

    actor.send(Ping, root.clone()).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let signals = log.lock().clone();
    assert!(signals.contains(&Signal::Paniced));
    assert!(signals.contains(&Signal::Restarting));
    assert!(signals.contains(&Signal::Restarted));
    assert!(actor.state().is_running());
}

#[tokio::test]
async fn one_for_one_with_destroy_decider_tears_down_the_child() {
    let root = ancestor("root", Prop::new(|| Box::new(AlwaysFails) as Box<dyn Behavior>)).unwrap();
    let supervisor = OneForOne::new(10, Duration::from_secs(60))
        .with_decider(Arc::new(|_cause| Directive::Destroy));
    let actor = root
        .spawn(
            "child",
            Prop::new(|| Box::new(AlwaysFails) as Box<dyn Behavior>).with_supervisor(Arc::new(supervisor)),
        )
        .unwrap();

    actor.send(Ping, root.clone()).unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;

    assert_eq!(actor.state(), Signal::Destroyed);
}

#[tokio::test]
async fn all_for_one_with_stop_decider_stops_every_sibling() {
    let root = ancestor("root", Prop::new(|| Box::new(AlwaysFails) as Box<dyn Behavior>)).unwrap();
    let supervisor: Arc<dyn Supervisor> = Arc::new(
        AllForOne::new(10, Duration::from_secs(60)).with_decider(Arc::new(|_cause| Directive::Stop)),
    );

    let a = root
        .spawn(
            "a",
            Prop::new(|| Box::new(AlwaysFails) as Box<dyn Behavior>).with_supervisor(supervisor.clone()),
        )
        .unwrap();
    let b = root
        .spawn(
            "b",
            Prop::new(|| Box::new(AlwaysFails) as Box<dyn Behavior>).with_supervisor(supervisor.clone()),
        )
        .unwrap();

    a.send(Ping, root.clone()).unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;

    assert_eq!(a.state(), Signal::Stopped);
    assert_eq!(b.state(), Signal::Stopped);
}

#[tokio::test]
async fn exponential_backoff_escalates_to_destroy_after_budget_exhausted() {
    let failures = Arc::new(AtomicU32::new(0));
    let failures_clone = failures.clone();

    struct CountingFailure(Arc<AtomicU32>);

    #[async_trait]
    impl Behavior for CountingFailure {
        async fn action(&mut self, _envelope: Envelope, _self_addr: &Addr) -> Result<(), BehaviorError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err("boom".into())
        }
    }

    let supervisor = ExponentialBackoffRestart::new(2, Duration::from_millis(2), None);
    let root = ancestor(
        "root",
        Prop::new(move || Box::new(CountingFailure(failures_clone.clone())) as Box<dyn Behavior>)
            .with_supervisor(Arc::new(supervisor)),
    )
    .unwrap();

    for _ in 0..3 {
        root.send(Ping, root.clone()).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(root.state(), Signal::Destroyed);
    assert!(failures.load(Ordering::SeqCst) >= 3);
}
