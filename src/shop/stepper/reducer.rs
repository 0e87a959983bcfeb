//! Reducer for the quantity stepper.

use crate::runtime::{Effect, Reducer};

use super::action::StepperAction;
use super::state::StepperState;

/// The count is unsigned, so the floor at zero lives here rather than in
/// every parent that embeds a stepper.
pub struct StepperReducer;

impl Reducer for StepperReducer {
    type State = StepperState;
    type Action = StepperAction;

    fn reduce(&self, state: &mut StepperState, action: StepperAction) -> Effect<StepperAction> {
        match action {
            StepperAction::Increment => state.count += 1,
            StepperAction::Decrement => state.count = state.count.saturating_sub(1),
        }
        Effect::none()
    }
}
