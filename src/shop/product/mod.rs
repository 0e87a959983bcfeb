mod action;
mod reducer;
mod state;

pub use action::ProductAction;
pub use reducer::product;
pub use state::ProductState;
