//! Composition combinators that lift child reducers into a parent's state
//! and action space.
//!
//! Every combinator runs the child reducer before the parent body, so the
//! parent always observes post-child state for the same action.

use std::fmt;

use super::effect::{Effect, ScopeKey};
use super::identified::{Identifiable, IdentifiedVec};
use super::reducer::Reducer;

/// Projection from a parent state to one of its fields.
///
/// The label names the field in logs and in effect scoping; it must be unique
/// among the siblings composed into the same parent.
pub struct Lens<P, C> {
    label: &'static str,
    project: fn(&mut P) -> &mut C,
}

impl<P, C> Lens<P, C> {
    pub fn new(label: &'static str, project: fn(&mut P) -> &mut C) -> Self {
        Self { label, project }
    }
}

impl<P, C> Clone for Lens<P, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, C> Copy for Lens<P, C> {}

impl<P, C> fmt::Debug for Lens<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lens").field(&self.label).finish()
    }
}

/// Mapping between a parent action case and the child action it wraps.
pub struct Case<P, C> {
    extract: fn(&P) -> Option<C>,
    embed: fn(C) -> P,
}

impl<P, C> Case<P, C> {
    pub fn new(extract: fn(&P) -> Option<C>, embed: fn(C) -> P) -> Self {
        Self { extract, embed }
    }
}

impl<P, C> Clone for Case<P, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, C> Copy for Case<P, C> {}

/// Mapping between a parent action case and an `(id, child action)` pair.
pub struct ElementCase<P, Id, C> {
    extract: fn(&P) -> Option<(Id, C)>,
    embed: fn(Id, C) -> P,
}

impl<P, Id, C> ElementCase<P, Id, C> {
    pub fn new(extract: fn(&P) -> Option<(Id, C)>, embed: fn(Id, C) -> P) -> Self {
        Self { extract, embed }
    }
}

impl<P, Id, C> Clone for ElementCase<P, Id, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, Id, C> Copy for ElementCase<P, Id, C> {}

/// Child reducer embedded in a plain field of the parent state.
pub struct Scope<R: Reducer, C: Reducer> {
    parent: R,
    child: C,
    lens: Lens<R::State, C::State>,
    case: Case<R::Action, C::Action>,
}

impl<R: Reducer, C: Reducer> Reducer for Scope<R, C> {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: &mut R::State, action: R::Action) -> Effect<R::Action> {
        let child_effect = match (self.case.extract)(&action) {
            Some(child_action) => self
                .child
                .reduce((self.lens.project)(state), child_action)
                .map(self.case.embed)
                .scoped(ScopeKey::Field(self.lens.label)),
            None => Effect::none(),
        };
        child_effect.merge(self.parent.reduce(state, action))
    }
}

/// Child reducer embedded in an optional field of the parent state.
///
/// The child only runs while the field is present. When the parent clears
/// the field, every in-flight effect of the child subtree is cancelled.
pub struct IfLet<R: Reducer, C: Reducer> {
    parent: R,
    child: C,
    lens: Lens<R::State, Option<C::State>>,
    case: Case<R::Action, C::Action>,
}

impl<R: Reducer, C: Reducer> Reducer for IfLet<R, C> {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: &mut R::State, action: R::Action) -> Effect<R::Action> {
        let key = ScopeKey::Presented(self.lens.label);
        let mut effect = Effect::none();

        if let Some(child_action) = (self.case.extract)(&action) {
            match (self.lens.project)(state) {
                Some(child_state) => {
                    effect = self
                        .child
                        .reduce(child_state, child_action)
                        .map(self.case.embed)
                        .scoped(key.clone());
                }
                None => tracing::debug!(
                    scope = self.lens.label,
                    action = ?child_action,
                    "Dropping action for absent child state"
                ),
            }
        }

        let was_present = (self.lens.project)(state).is_some();
        let parent_effect = self.parent.reduce(state, action);
        if was_present && (self.lens.project)(state).is_none() {
            tracing::debug!(scope = self.lens.label, "Child state dismissed, cancelling its effects");
            effect = effect.merge(Effect::cancel_subtree(key));
        }

        effect.merge(parent_effect)
    }
}

/// Child reducer applied to individual elements of an [`IdentifiedVec`].
///
/// Actions addressed to an id that is no longer present are dropped. Elements
/// removed by the parent have their in-flight effects cancelled.
pub struct ForEach<R: Reducer, C: Reducer>
where
    C::State: Identifiable,
{
    parent: R,
    child: C,
    lens: Lens<R::State, IdentifiedVec<C::State>>,
    case: ElementCase<R::Action, <C::State as Identifiable>::Id, C::Action>,
}

impl<R: Reducer, C: Reducer> ForEach<R, C>
where
    C::State: Identifiable,
{
    fn element_key(&self, id: &<C::State as Identifiable>::Id) -> ScopeKey {
        ScopeKey::Element {
            field: self.lens.label,
            id: format!("{:?}", id),
        }
    }
}

impl<R: Reducer, C: Reducer> Reducer for ForEach<R, C>
where
    C::State: Identifiable,
{
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: &mut R::State, action: R::Action) -> Effect<R::Action> {
        let mut effect = Effect::none();

        if let Some((id, child_action)) = (self.case.extract)(&action) {
            let key = self.element_key(&id);
            match (self.lens.project)(state).get_mut(&id) {
                Some(element) => {
                    let embed = self.case.embed;
                    effect = self
                        .child
                        .reduce(element, child_action)
                        .map(move |child| embed(id.clone(), child))
                        .scoped(key);
                }
                None => tracing::debug!(
                    scope = self.lens.label,
                    id = ?id,
                    action = ?child_action,
                    "Dropping action for missing element"
                ),
            }
        }

        let before = (self.lens.project)(state).id_snapshot();
        let parent_effect = self.parent.reduce(state, action);
        let elements = (self.lens.project)(state);
        if elements.is_unchanged_since(&before) {
            return effect.merge(parent_effect);
        }
        for id in before.iter().filter(|id| !elements.contains(id)) {
            tracing::debug!(scope = self.lens.label, id = ?id, "Element removed, cancelling its effects");
            effect = effect.merge(Effect::cancel_subtree(self.element_key(id)));
        }

        effect.merge(parent_effect)
    }
}

/// Builder methods for composing reducers.
pub trait ReducerExt: Reducer + Sized {
    /// Run `child` on a plain field before this reducer.
    fn scope<C: Reducer>(
        self,
        lens: Lens<Self::State, C::State>,
        case: Case<Self::Action, C::Action>,
        child: C,
    ) -> Scope<Self, C> {
        Scope {
            parent: self,
            child,
            lens,
            case,
        }
    }

    /// Run `child` on an optional field before this reducer, while present.
    fn if_let<C: Reducer>(
        self,
        lens: Lens<Self::State, Option<C::State>>,
        case: Case<Self::Action, C::Action>,
        child: C,
    ) -> IfLet<Self, C> {
        IfLet {
            parent: self,
            child,
            lens,
            case,
        }
    }

    /// Run `child` on the addressed element of a collection before this reducer.
    fn for_each<C>(
        self,
        lens: Lens<Self::State, IdentifiedVec<C::State>>,
        case: ElementCase<Self::Action, <C::State as Identifiable>::Id, C::Action>,
        child: C,
    ) -> ForEach<Self, C>
    where
        C: Reducer,
        C::State: Identifiable,
    {
        ForEach {
            parent: self,
            child,
            lens,
            case,
        }
    }
}

impl<R: Reducer> ReducerExt for R {}
