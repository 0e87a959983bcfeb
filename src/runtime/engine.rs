//! Reduce-and-execute core shared by [`Store`](super::Store) and
//! [`TestStore`](super::TestStore).
//!
//! The engine owns the state, the reducer and the table of running effect
//! tasks. It never delivers effect output itself: tasks write [`Message`]s
//! into an unbounded channel and the owner decides when to feed them back.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::effect::{CancelId, CancelTarget, Emitter, Operation, RunOp, ScopePath};
use super::reducer::Reducer;

pub(crate) enum Message<A> {
    Action { task: u64, action: A },
    Finished { task: u64 },
}

struct InFlight {
    scope: ScopePath,
    cancel_id: Option<CancelId>,
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl InFlight {
    fn matches(&self, target: &CancelTarget) -> bool {
        match target {
            CancelTarget::Id { scope, id } => {
                &self.scope == scope && self.cancel_id.as_ref() == Some(id)
            }
            CancelTarget::Subtree(prefix) => self.scope.starts_with(prefix),
        }
    }
}

pub(crate) struct Engine<R: Reducer> {
    reducer: R,
    state: R::State,
    tasks: HashMap<u64, InFlight>,
    next_task: u64,
    runtime: Handle,
    outbox: mpsc::UnboundedSender<Message<R::Action>>,
    slow_transition: Duration,
}

impl<R: Reducer> Engine<R> {
    pub(crate) fn new(
        reducer: R,
        state: R::State,
        runtime: Handle,
        slow_transition: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Message<R::Action>>) {
        let (outbox, inbox) = mpsc::unbounded_channel();
        let engine = Self {
            reducer,
            state,
            tasks: HashMap::new(),
            next_task: 0,
            runtime,
            outbox,
            slow_transition,
        };
        (engine, inbox)
    }

    pub(crate) fn state(&self) -> &R::State {
        &self.state
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Run one transition and execute its effects.
    ///
    /// Returns the actions produced synchronously by [`Effect::send`](super::Effect::send),
    /// in order; the caller feeds them back as separate cycles.
    pub(crate) fn reduce(&mut self, action: R::Action) -> Vec<R::Action> {
        tracing::trace!(action = ?action, "Reducing action");
        let started = Instant::now();
        let effect = self.reducer.reduce(&mut self.state, action);
        let elapsed = started.elapsed();
        if elapsed > self.slow_transition {
            tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                "Slow transition; reducers must not block"
            );
        }

        let mut sent = Vec::new();
        for operation in effect.into_operations() {
            match operation {
                Operation::Send(action) => sent.push(action),
                Operation::Run(run) => self.spawn(run),
                Operation::Cancel(target) => {
                    self.cancel(&target);
                }
            }
        }
        sent
    }

    /// Filter a message from the effect channel.
    ///
    /// Returns the action if its task is still live; output of cancelled
    /// tasks is dropped here even if it was already queued.
    pub(crate) fn accept(&mut self, message: Message<R::Action>) -> Option<R::Action> {
        match message {
            Message::Action { task, action } => {
                if self.tasks.contains_key(&task) {
                    Some(action)
                } else {
                    tracing::trace!(task, action = ?action, "Dropping output of cancelled effect");
                    None
                }
            }
            Message::Finished { task } => {
                if let Some(finished) = self.tasks.remove(&task) {
                    tracing::trace!(task, scope = %finished.scope, "Effect finished");
                }
                None
            }
        }
    }

    pub(crate) fn cancel_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.cancelled.store(true, Ordering::SeqCst);
            task.handle.abort();
        }
    }

    fn spawn(&mut self, run: RunOp<R::Action>) {
        let RunOp {
            work,
            cancel_id,
            cancel_in_flight,
            scope,
        } = run;

        if cancel_in_flight {
            if let Some(id) = &cancel_id {
                self.cancel(&CancelTarget::Id {
                    scope: scope.clone(),
                    id: id.clone(),
                });
            }
        }

        let task = self.next_task;
        self.next_task += 1;

        let cancelled = Arc::new(AtomicBool::new(false));
        let emitter = {
            let cancelled = Arc::clone(&cancelled);
            let outbox = self.outbox.clone();
            Emitter::new(move |action| {
                if !cancelled.load(Ordering::SeqCst) {
                    let _ = outbox.send(Message::Action { task, action });
                }
            })
        };
        let outbox = self.outbox.clone();
        let handle = self.runtime.spawn(async move {
            work(emitter).await;
            let _ = outbox.send(Message::Finished { task });
        });

        tracing::debug!(task, scope = %scope, cancel_id = ?cancel_id, "Effect started");
        self.tasks.insert(
            task,
            InFlight {
                scope,
                cancel_id,
                cancelled,
                handle,
            },
        );
    }

    /// Cancel every task matching `target`. Returns how many were stopped.
    fn cancel(&mut self, target: &CancelTarget) -> usize {
        let matching: Vec<u64> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.matches(target))
            .map(|(key, _)| *key)
            .collect();

        if matching.is_empty() {
            if let CancelTarget::Id { scope, id } = target {
                tracing::debug!(
                    scope = %scope,
                    cancel_id = %id,
                    "Cancel matched no running effect in this scope"
                );
            }
            return 0;
        }

        let count = matching.len();
        for key in matching {
            if let Some(task) = self.tasks.remove(&key) {
                task.cancelled.store(true, Ordering::SeqCst);
                task.handle.abort();
                tracing::debug!(task = key, scope = %task.scope, "Effect cancelled");
            }
        }
        count
    }
}

impl<R: Reducer> Drop for Engine<R> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
