//! Reducer trait for the unidirectional runtime.

use std::fmt;
use std::marker::PhantomData;

use super::action::Action;
use super::effect::Effect;
use super::state::FeatureState;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen. It mutates
/// the state in place and describes follow-up work as an [`Effect`]; it must
/// never block or perform I/O itself.
pub trait Reducer: Send + 'static {
    /// The state type this reducer operates on.
    type State: FeatureState;

    /// The action type this reducer handles.
    type Action: Action;

    /// Process an action, mutating `state` and returning the effects to run.
    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action>;
}

/// Reducer built from a closure.
pub struct Reduce<S, A, F> {
    body: F,
    _marker: PhantomData<fn() -> (S, A)>,
}

impl<S, A, F> Reduce<S, A, F>
where
    S: FeatureState,
    A: Action,
    F: Fn(&mut S, A) -> Effect<A> + Send + 'static,
{
    pub fn new(body: F) -> Self {
        Self {
            body,
            _marker: PhantomData,
        }
    }
}

impl<S, A, F> Reducer for Reduce<S, A, F>
where
    S: FeatureState,
    A: Action,
    F: Fn(&mut S, A) -> Effect<A> + Send + 'static,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: &mut S, action: A) -> Effect<A> {
        (self.body)(state, action)
    }
}

impl<S, A, F> fmt::Debug for Reduce<S, A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Reduce")
    }
}
