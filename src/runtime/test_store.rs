//! Exhaustive test harness for reducers.
//!
//! `TestStore` drives the same engine as [`Store`](super::Store) but hands
//! control of every step to the test: each sent or received action must be
//! declared together with the exact state change it causes, and `finish`
//! fails if any effect is still running or produced an action nobody
//! asserted on.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};

use crate::config::HarnessConfig;

use super::engine::{Engine, Message};
use super::reducer::Reducer;
use super::store::StoreSettings;

pub struct TestStore<R: Reducer> {
    engine: Engine<R>,
    inbox: mpsc::UnboundedReceiver<Message<R::Action>>,
    received: VecDeque<R::Action>,
    timeout: Duration,
}

impl<R: Reducer> TestStore<R> {
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn new(initial: R::State, reducer: R) -> Self {
        let (engine, inbox) = Engine::new(
            reducer,
            initial,
            Handle::current(),
            StoreSettings::default().slow_transition,
        );
        Self {
            engine,
            inbox,
            received: VecDeque::new(),
            timeout: HarnessConfig::default().receive_timeout(),
        }
    }

    /// How long `receive` and `finish` wait for effects.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply the `[harness]` section of the config file.
    pub fn with_config(self, config: &HarnessConfig) -> Self {
        self.with_timeout(config.receive_timeout())
    }

    pub fn state(&self) -> &R::State {
        self.engine.state()
    }

    /// Send `action` and assert the resulting state equals the current state
    /// with `update` applied.
    ///
    /// # Panics
    /// Panics if earlier actions are still waiting to be received, or on a
    /// state mismatch.
    #[track_caller]
    pub fn send(&mut self, action: R::Action, update: impl FnOnce(&mut R::State)) {
        if !self.received.is_empty() {
            panic!(
                "Must handle {} received action(s) before sending {:?}: {:#?}",
                self.received.len(),
                action,
                self.received
            );
        }

        let mut expected = self.engine.state().clone();
        let sent = self.engine.reduce(action);
        self.received.extend(sent);
        update(&mut expected);
        self.assert_state(&expected, "send");
    }

    /// Wait for the next action fed back by an effect, assert it equals
    /// `expected_action`, reduce it and assert the resulting state.
    ///
    /// # Panics
    /// Panics on timeout, on a different action, or on a state mismatch.
    pub async fn receive(&mut self, expected_action: R::Action, update: impl FnOnce(&mut R::State)) {
        let action = match self.received.pop_front() {
            Some(action) => action,
            None => match self.next_delivered().await {
                Some(action) => action,
                None => panic!(
                    "Expected to receive {:?} but nothing arrived within {:?}",
                    expected_action, self.timeout
                ),
            },
        };
        assert_eq!(action, expected_action, "Received an unexpected action");

        let mut expected = self.engine.state().clone();
        let sent = self.engine.reduce(action);
        for action in sent.into_iter().rev() {
            self.received.push_front(action);
        }
        update(&mut expected);
        self.assert_state(&expected, "receive");
    }

    /// Assert that every action was received and every effect has finished.
    ///
    /// # Panics
    /// Panics if actions are left unreceived, if a running effect emits, or
    /// if effects are still running when the timeout elapses.
    pub async fn finish(mut self) {
        if !self.received.is_empty() {
            panic!(
                "{} received action(s) were never asserted: {:#?}",
                self.received.len(),
                self.received
            );
        }

        let deadline = Instant::now() + self.timeout;
        while self.engine.in_flight() > 0 {
            match timeout_at(deadline, self.inbox.recv()).await {
                Ok(Some(message)) => {
                    if let Some(action) = self.engine.accept(message) {
                        panic!("Effect emitted an unhandled action: {:?}", action);
                    }
                }
                Ok(None) => break,
                Err(_) => panic!(
                    "{} effect(s) still in flight after {:?}",
                    self.engine.in_flight(),
                    self.timeout
                ),
            }
        }
    }

    /// Discard actions that have been received but not asserted.
    pub fn skip_received_actions(&mut self) {
        while let Ok(message) = self.inbox.try_recv() {
            if let Some(action) = self.engine.accept(message) {
                self.received.push_back(action);
            }
        }
        tracing::debug!(count = self.received.len(), "Skipping received actions");
        self.received.clear();
    }

    /// Cancel every running effect so `finish` does not wait on it.
    pub fn skip_in_flight_effects(&mut self) {
        tracing::debug!(count = self.engine.in_flight(), "Skipping in-flight effects");
        self.engine.cancel_all();
    }

    async fn next_delivered(&mut self) -> Option<R::Action> {
        let deadline = Instant::now() + self.timeout;
        loop {
            let message = timeout_at(deadline, self.inbox.recv()).await.ok()??;
            if let Some(action) = self.engine.accept(message) {
                return Some(action);
            }
        }
    }

    #[track_caller]
    fn assert_state(&self, expected: &R::State, step: &str) {
        let actual = self.engine.state();
        if actual != expected {
            panic!(
                "State mismatch after {}\n\nexpected: {:#?}\n\nactual: {:#?}",
                step, expected, actual
            );
        }
    }
}

impl<R: Reducer> Debug for TestStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestStore")
            .field("state", self.engine.state())
            .field("received", &self.received)
            .field("in_flight", &self.engine.in_flight())
            .finish()
    }
}
