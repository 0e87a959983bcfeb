mod action;
mod reducer;
mod state;

pub use action::CartItemAction;
pub use reducer::CartItemReducer;
pub use state::CartItemState;
