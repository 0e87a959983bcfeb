mod action;
mod reducer;
mod state;

pub use action::ProductListAction;
pub use reducer::{product_list, ProductListReducer};
pub use state::ProductListState;
