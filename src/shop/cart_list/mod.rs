mod action;
mod reducer;
mod state;

pub use action::CartListAction;
pub use reducer::{cart_list, CartListReducer};
pub use state::CartListState;
