//! Effects: descriptions of deferred work that feed actions back into a store.

use std::borrow::Cow;
use std::fmt;
use std::future::{poll_fn, Future};
use std::pin::Pin;
use std::sync::Arc;

use futures_core::Stream;

pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
pub(crate) type Work<A> = Box<dyn FnOnce(Emitter<A>) -> BoxFuture + Send + 'static>;

/// Identifier used to cancel a running effect.
///
/// Ids are scoped to the feature that declared them, so two elements of a
/// collection can use the same id without cancelling each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CancelId(Cow<'static, str>);

impl CancelId {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }
}

impl From<&'static str> for CancelId {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for CancelId {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for CancelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One step in the path from the root state to the feature owning an effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ScopeKey {
    Field(&'static str),
    Presented(&'static str),
    Element { field: &'static str, id: String },
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKey::Field(name) => f.write_str(name),
            ScopeKey::Presented(name) => write!(f, "{}?", name),
            ScopeKey::Element { field, id } => write!(f, "{}[{}]", field, id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct ScopePath(Vec<ScopeKey>);

impl ScopePath {
    fn prepend(&mut self, key: ScopeKey) {
        self.0.insert(0, key);
    }

    pub(crate) fn starts_with(&self, prefix: &ScopePath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (index, key) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CancelTarget {
    /// Effects started with `id` by the feature at exactly `scope`.
    Id { scope: ScopePath, id: CancelId },
    /// Every effect started at or below the given scope.
    Subtree(ScopePath),
}

impl CancelTarget {
    fn prepend(&mut self, key: ScopeKey) {
        match self {
            CancelTarget::Id { scope, .. } => scope.prepend(key),
            CancelTarget::Subtree(scope) => scope.prepend(key),
        }
    }
}

pub(crate) struct RunOp<A> {
    pub(crate) work: Work<A>,
    pub(crate) cancel_id: Option<CancelId>,
    pub(crate) cancel_in_flight: bool,
    pub(crate) scope: ScopePath,
}

impl<A: Send + 'static> RunOp<A> {
    fn map<B, F>(self, f: Arc<F>) -> RunOp<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let RunOp {
            work,
            cancel_id,
            cancel_in_flight,
            scope,
        } = self;

        RunOp {
            work: Box::new(move |outer: Emitter<B>| -> BoxFuture {
                let inner = Emitter::new(move |action: A| outer.emit((*f)(action)));
                work(inner)
            }),
            cancel_id,
            cancel_in_flight,
            scope,
        }
    }
}

pub(crate) enum Operation<A> {
    Send(A),
    Run(RunOp<A>),
    Cancel(CancelTarget),
}

/// Handle passed to running effects for feeding actions back into the store.
///
/// Emitting after the effect was cancelled is a silent no-op.
pub struct Emitter<A> {
    sink: Arc<dyn Fn(A) + Send + Sync>,
}

impl<A> Clone for Emitter<A> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<A: Send + 'static> Emitter<A> {
    pub(crate) fn new<F>(sink: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Send an action back to the owning store.
    pub fn emit(&self, action: A) {
        (self.sink)(action)
    }
}

/// Deferred work returned by a reducer.
///
/// Operations start in the order they were merged. [`Effect::send`] actions
/// are processed as separate dispatch cycles after the current one has
/// published its snapshot.
#[must_use = "effects do nothing unless returned to the store"]
pub struct Effect<A> {
    operations: Vec<Operation<A>>,
}

impl<A> Default for Effect<A> {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
        }
    }
}

impl<A: Send + 'static> Effect<A> {
    /// No work.
    pub fn none() -> Self {
        Self::default()
    }

    /// Feed `action` back into the store synchronously, without suspension.
    pub fn send(action: A) -> Self {
        Self {
            operations: vec![Operation::Send(action)],
        }
    }

    /// Run `work` as a task; it may emit any number of actions over time.
    pub fn run<F, Fut>(work: F) -> Self
    where
        F: FnOnce(Emitter<A>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let body: Work<A> =
            Box::new(move |emitter: Emitter<A>| -> BoxFuture { Box::pin(work(emitter)) });
        Self {
            operations: vec![Operation::Run(RunOp {
                work: body,
                cancel_id: None,
                cancel_in_flight: false,
                scope: ScopePath::default(),
            })],
        }
    }

    /// Await `future` and feed its output back as a single action.
    pub fn future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::run(move |emitter| async move {
            emitter.emit(future.await);
        })
    }

    /// Forward every item of `stream` as an action until it ends.
    pub fn stream<St>(stream: St) -> Self
    where
        St: Stream<Item = A> + Send + 'static,
    {
        Self::run(move |emitter| async move {
            let mut stream = Box::pin(stream);
            while let Some(action) = poll_fn(|cx| stream.as_mut().poll_next(cx)).await {
                emitter.emit(action);
            }
        })
    }

    /// Cancel effects this feature started with `id`.
    pub fn cancel(id: impl Into<CancelId>) -> Self {
        Self {
            operations: vec![Operation::Cancel(CancelTarget::Id {
                scope: ScopePath::default(),
                id: id.into(),
            })],
        }
    }

    pub(crate) fn cancel_subtree(key: ScopeKey) -> Self {
        Self {
            operations: vec![Operation::Cancel(CancelTarget::Subtree(ScopePath(vec![
                key,
            ])))],
        }
    }

    /// Tag every task in this effect with `id`.
    ///
    /// With `cancel_in_flight`, starting the effect first cancels tasks still
    /// running under the same id.
    pub fn cancellable(mut self, id: impl Into<CancelId>, cancel_in_flight: bool) -> Self {
        let id = id.into();
        for operation in &mut self.operations {
            if let Operation::Run(run) = operation {
                run.cancel_id = Some(id.clone());
                run.cancel_in_flight = cancel_in_flight;
            }
        }
        self
    }

    pub fn merge(mut self, other: Effect<A>) -> Self {
        self.operations.extend(other.operations);
        self
    }

    /// Transform every action this effect produces.
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let operations = self
            .operations
            .into_iter()
            .map(|operation| match operation {
                Operation::Send(action) => Operation::Send((*f)(action)),
                Operation::Run(run) => Operation::Run(run.map(Arc::clone(&f))),
                Operation::Cancel(target) => Operation::Cancel(target),
            })
            .collect();
        Effect { operations }
    }

    pub fn is_none(&self) -> bool {
        self.operations.is_empty()
    }

    pub(crate) fn scoped(mut self, key: ScopeKey) -> Self {
        for operation in &mut self.operations {
            match operation {
                Operation::Send(_) => {}
                Operation::Run(run) => run.scope.prepend(key.clone()),
                Operation::Cancel(target) => target.prepend(key.clone()),
            }
        }
        self
    }

    pub(crate) fn into_operations(self) -> Vec<Operation<A>> {
        self.operations
    }
}

impl<A: Send + 'static> FromIterator<Effect<A>> for Effect<A> {
    fn from_iter<I: IntoIterator<Item = Effect<A>>>(iter: I) -> Self {
        iter.into_iter().fold(Effect::none(), Effect::merge)
    }
}

impl<A: fmt::Debug> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for operation in &self.operations {
            match operation {
                Operation::Send(action) => list.entry(&format_args!("Send({:?})", action)),
                Operation::Run(run) => list.entry(&format_args!(
                    "Run {{ scope: {}, cancel_id: {:?} }}",
                    run.scope, run.cancel_id
                )),
                Operation::Cancel(target) => list.entry(&format_args!("Cancel({:?})", target)),
            };
        }
        list.finish()
    }
}
