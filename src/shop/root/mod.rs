mod action;
mod reducer;
mod state;

pub use action::RootAction;
pub use reducer::{root, RootReducer};
pub use state::{RootState, Tab};
