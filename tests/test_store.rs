use std::time::Duration;

use shopflow::runtime::{Action, Effect, FeatureState, Reduce, Reducer, TestStore};

#[derive(Debug, Clone, Default, PartialEq)]
struct Tally {
    total: i32,
    log: Vec<&'static str>,
}

impl FeatureState for Tally {}

#[derive(Debug, Clone, PartialEq)]
enum TallyAction {
    Add(i32),
    AddThenDouble(i32),
    Double,
    Fetch,
    Fetched(i32),
    Forever,
    Ping,
}

impl Action for TallyAction {}

fn tally() -> impl Reducer<State = Tally, Action = TallyAction> {
    Reduce::new(|state: &mut Tally, action: TallyAction| match action {
        TallyAction::Add(n) => {
            state.total += n;
            Effect::none()
        }
        TallyAction::AddThenDouble(n) => {
            state.total += n;
            Effect::send(TallyAction::Double)
        }
        TallyAction::Double => {
            state.total *= 2;
            Effect::none()
        }
        TallyAction::Fetch => {
            state.log.push("fetch");
            Effect::future(async { TallyAction::Fetched(7) })
        }
        TallyAction::Fetched(n) => {
            state.total = n;
            Effect::none()
        }
        TallyAction::Forever => Effect::run(|_emitter| std::future::pending::<()>()),
        TallyAction::Ping => Effect::run(|emitter| async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            emitter.emit(TallyAction::Add(1));
        }),
    })
}

#[tokio::test]
async fn send_asserts_exact_mutation() {
    let mut store = TestStore::new(Tally::default(), tally());

    store.send(TallyAction::Add(3), |state| state.total = 3);
    store.send(TallyAction::Add(-1), |state| state.total = 2);

    assert_eq!(store.state().total, 2);
    store.finish().await;
}

#[tokio::test]
#[should_panic(expected = "State mismatch after send")]
async fn send_fails_on_unexpected_mutation() {
    let mut store = TestStore::new(Tally::default(), tally());
    store.send(TallyAction::Add(3), |state| state.total = 4);
}

#[tokio::test]
async fn receive_handles_synchronously_sent_actions() {
    let mut store = TestStore::new(Tally::default(), tally());

    store.send(TallyAction::AddThenDouble(2), |state| state.total = 2);
    store
        .receive(TallyAction::Double, |state| state.total = 4)
        .await;
    store.finish().await;
}

#[tokio::test]
#[should_panic(expected = "Must handle 1 received action(s)")]
async fn send_fails_while_actions_are_unreceived() {
    let mut store = TestStore::new(Tally::default(), tally());
    store.send(TallyAction::AddThenDouble(2), |state| state.total = 2);
    store.send(TallyAction::Add(1), |state| state.total = 3);
}

#[tokio::test]
async fn receive_waits_for_effect_output() {
    let mut store = TestStore::new(Tally::default(), tally());

    store.send(TallyAction::Fetch, |state| state.log.push("fetch"));
    store
        .receive(TallyAction::Fetched(7), |state| state.total = 7)
        .await;
    store.finish().await;
}

#[tokio::test]
#[should_panic(expected = "Received an unexpected action")]
async fn receive_fails_on_different_action() {
    let mut store = TestStore::new(Tally::default(), tally());
    store.send(TallyAction::Fetch, |state| state.log.push("fetch"));
    store
        .receive(TallyAction::Fetched(8), |state| state.total = 8)
        .await;
}

#[tokio::test]
#[should_panic(expected = "nothing arrived")]
async fn receive_times_out() {
    let mut store =
        TestStore::new(Tally::default(), tally()).with_timeout(Duration::from_millis(20));
    store.send(TallyAction::Forever, |_| {});
    store.receive(TallyAction::Ping, |_| {}).await;
}

#[tokio::test]
#[should_panic(expected = "were never asserted")]
async fn finish_fails_on_unreceived_actions() {
    let mut store = TestStore::new(Tally::default(), tally());
    store.send(TallyAction::AddThenDouble(1), |state| state.total = 1);
    store.finish().await;
}

#[tokio::test]
#[should_panic(expected = "Effect emitted an unhandled action")]
async fn finish_fails_when_effect_emits() {
    let mut store = TestStore::new(Tally::default(), tally());
    store.send(TallyAction::Ping, |_| {});
    store.finish().await;
}

#[tokio::test]
#[should_panic(expected = "still in flight")]
async fn finish_fails_on_running_effect() {
    let mut store =
        TestStore::new(Tally::default(), tally()).with_timeout(Duration::from_millis(20));
    store.send(TallyAction::Forever, |_| {});
    store.finish().await;
}

#[tokio::test]
async fn skipping_in_flight_effects_lets_finish_pass() {
    let mut store = TestStore::new(Tally::default(), tally());
    store.send(TallyAction::Forever, |_| {});
    store.skip_in_flight_effects();
    store.finish().await;
}

#[tokio::test]
async fn skipping_received_actions_discards_them() {
    let mut store = TestStore::new(Tally::default(), tally());
    store.send(TallyAction::AddThenDouble(5), |state| state.total = 5);
    store.skip_received_actions();

    // Double was discarded without being reduced.
    assert_eq!(store.state().total, 5);
    store.send(TallyAction::Add(1), |state| state.total = 6);
    store.finish().await;
}
