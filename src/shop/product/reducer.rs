//! Reducer for one product row.

use crate::runtime::{Case, Effect, Lens, Reduce, Reducer, ReducerExt};
use crate::shop::stepper::StepperReducer;

use super::action::ProductAction;
use super::state::ProductState;

/// The row has no logic of its own; it hosts the stepper.
pub fn product() -> impl Reducer<State = ProductState, Action = ProductAction> {
    Reduce::new(|_state: &mut ProductState, _action: ProductAction| Effect::none()).scope(
        Lens::new("stepper", |state: &mut ProductState| &mut state.stepper),
        Case::new(
            |action: &ProductAction| match action {
                ProductAction::Stepper(action) => Some(*action),
            },
            ProductAction::Stepper,
        ),
        StepperReducer,
    )
}
