//! Reducer for the app root.

use crate::dependencies::{ApiClient, IdGenerator};
use crate::runtime::{Case, Effect, Lens, Reducer, ReducerExt};
use crate::shop::product_list::product_list;
use crate::shop::profile::ProfileReducer;

use super::action::RootAction;
use super::state::RootState;

/// Tab selection. Everything else belongs to the tabs.
pub struct RootReducer;

impl Reducer for RootReducer {
    type State = RootState;
    type Action = RootAction;

    fn reduce(&self, state: &mut RootState, action: RootAction) -> Effect<RootAction> {
        match action {
            RootAction::SelectTab(tab) => {
                state.selected_tab = tab;
                Effect::none()
            }
            RootAction::ProductList(_) | RootAction::Profile(_) => Effect::none(),
        }
    }
}

/// The whole app.
pub fn root(api: ApiClient, ids: IdGenerator) -> impl Reducer<State = RootState, Action = RootAction> {
    RootReducer
        .scope(
            Lens::new("product_list", |state: &mut RootState| &mut state.product_list),
            Case::new(
                |action: &RootAction| match action {
                    RootAction::ProductList(action) => Some(action.clone()),
                    _ => None,
                },
                RootAction::ProductList,
            ),
            product_list(api.clone(), ids),
        )
        .scope(
            Lens::new("profile", |state: &mut RootState| &mut state.profile),
            Case::new(
                |action: &RootAction| match action {
                    RootAction::Profile(action) => Some(action.clone()),
                    _ => None,
                },
                RootAction::Profile,
            ),
            ProfileReducer::new(api),
        )
}
