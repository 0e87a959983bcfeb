mod action;
mod reducer;
mod state;

pub use action::ProfileAction;
pub use reducer::ProfileReducer;
pub use state::{ProfileDataState, ProfileState};
