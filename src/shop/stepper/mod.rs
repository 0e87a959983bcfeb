mod action;
mod reducer;
mod state;

pub use action::StepperAction;
pub use reducer::StepperReducer;
pub use state::StepperState;
