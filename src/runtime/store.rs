//! The runtime that owns one state tree.
//!
//! ```text
//! dispatch(action) ──► [lock] ──► reducer ──► publish snapshot ──► observers
//!                         ▲            │
//!                         │            └──► effect tasks ──► channel
//!                         │                                     │
//!                         └────────── driver task ◄─────────────┘
//! ```
//!
//! Every transition runs under one reentrant lock, so dispatches from any
//! thread and effect deliveries are serialized into a single order.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::ReentrantMutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::engine::{Engine, Message};
use super::reducer::Reducer;

/// Transitions slower than this are logged as a warning by default.
const DEFAULT_SLOW_TRANSITION: Duration = Duration::from_millis(16);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no Tokio runtime is running on this thread; use Store::on_runtime")]
    NoRuntime,
}

/// Tunables for a [`Store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub slow_transition: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            slow_transition: DEFAULT_SLOW_TRANSITION,
        }
    }
}

type Observer<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Core<R: Reducer> {
    engine: Engine<R>,
    pending: VecDeque<R::Action>,
    draining: bool,
    observers: Vec<(u64, Observer<R::State>)>,
    next_observer: u64,
}

impl<R: Reducer> Core<R> {
    /// Reduce one action. Returns the snapshot to publish, if anyone listens.
    fn step(&mut self, action: R::Action) -> Option<(R::State, Vec<Observer<R::State>>)> {
        let sent = self.engine.reduce(action);
        for action in sent.into_iter().rev() {
            self.pending.push_front(action);
        }

        if self.observers.is_empty() {
            return None;
        }
        let observers = self
            .observers
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        Some((self.engine.state().clone(), observers))
    }
}

struct Shared<R: Reducer> {
    core: ReentrantMutex<RefCell<Core<R>>>,
}

impl<R: Reducer> Shared<R> {
    /// Queue `action` and drain the queue unless an outer call on this thread
    /// is already draining it.
    fn process(&self, action: R::Action) {
        let guard = self.core.lock();
        {
            let mut core = guard.borrow_mut();
            core.pending.push_back(action);
            if core.draining {
                return;
            }
            core.draining = true;
        }

        let _reset = scopeguard::guard((), |()| {
            if let Ok(mut core) = guard.try_borrow_mut() {
                core.draining = false;
            }
        });

        loop {
            let published = {
                let mut core = guard.borrow_mut();
                let Some(action) = core.pending.pop_front() else {
                    break;
                };
                core.step(action)
            };

            // Observers run without the borrow so they may read or dispatch.
            if let Some((snapshot, observers)) = published {
                for observer in observers {
                    observer(&snapshot);
                }
            }
        }
    }

    fn deliver(&self, message: Message<R::Action>) {
        // Hold the lock from the liveness check until the action is reduced,
        // so a concurrent cancel cannot slip in between.
        let guard = self.core.lock();
        let accepted = guard.borrow_mut().engine.accept(message);
        if let Some(action) = accepted {
            self.process(action);
        }
        drop(guard);
    }
}

async fn drive<R: Reducer>(
    shared: Weak<Shared<R>>,
    mut inbox: mpsc::UnboundedReceiver<Message<R::Action>>,
) {
    while let Some(message) = inbox.recv().await {
        let Some(shared) = shared.upgrade() else {
            break;
        };
        shared.deliver(message);
    }
    tracing::trace!("Store driver stopped");
}

/// Owner of a state tree and the effects its reducer starts.
///
/// Cloning yields another handle to the same store. Dropping the last handle
/// aborts every in-flight effect.
pub struct Store<R: Reducer> {
    shared: Arc<Shared<R>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store on the current Tokio runtime.
    ///
    /// # Errors
    /// Returns [`StoreError::NoRuntime`] when called outside a runtime.
    pub fn new(initial: R::State, reducer: R) -> Result<Self, StoreError> {
        Self::with_settings(initial, reducer, &StoreSettings::default())
    }

    pub fn with_settings(
        initial: R::State,
        reducer: R,
        settings: &StoreSettings,
    ) -> Result<Self, StoreError> {
        let handle = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;
        Ok(Self::on_runtime(handle, initial, reducer, settings))
    }

    /// Create a store whose effects run on `handle`.
    pub fn on_runtime(
        handle: Handle,
        initial: R::State,
        reducer: R,
        settings: &StoreSettings,
    ) -> Self {
        let (engine, inbox) = Engine::new(reducer, initial, handle.clone(), settings.slow_transition);
        let shared = Arc::new(Shared {
            core: ReentrantMutex::new(RefCell::new(Core {
                engine,
                pending: VecDeque::new(),
                draining: false,
                observers: Vec::new(),
                next_observer: 0,
            })),
        });
        handle.spawn(drive(Arc::downgrade(&shared), inbox));
        tracing::debug!("Store created");
        Self { shared }
    }

    /// Run the reducer for `action`, start its effects and publish the
    /// resulting snapshot before returning.
    ///
    /// Called from inside an observer, the action is queued and processed
    /// by the outer dispatch once the current cycle has published.
    pub fn dispatch(&self, action: R::Action) {
        self.shared.process(action);
    }

    pub fn state(&self) -> R::State {
        self.with_state(Clone::clone)
    }

    /// Borrow the current state without cloning it.
    ///
    /// # Panics
    /// `read` must not dispatch into this store.
    pub fn with_state<T>(&self, read: impl FnOnce(&R::State) -> T) -> T {
        let guard = self.shared.core.lock();
        let core = guard.borrow();
        read(core.engine.state())
    }

    /// Number of effect tasks that have started and not yet finished or
    /// been cancelled.
    pub fn in_flight_effects(&self) -> usize {
        let guard = self.shared.core.lock();
        let count = guard.borrow().engine.in_flight();
        count
    }

    /// Call `observer` with every snapshot published from now on.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&R::State) + Send + Sync + 'static,
    {
        let id = {
            let guard = self.shared.core.lock();
            let mut core = guard.borrow_mut();
            let id = core.next_observer;
            core.next_observer += 1;
            core.observers.push((id, Arc::new(observer)));
            id
        };

        let shared = Arc::downgrade(&self.shared);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(shared) = shared.upgrade() {
                    let guard = shared.core.lock();
                    guard
                        .borrow_mut()
                        .observers
                        .retain(|(key, _)| *key != id);
                }
            })),
        }
    }
}

/// Keeps an observer registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn cancel(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}
