//! State for the product catalogue screen.

use crate::runtime::{FeatureState, IdentifiedVec};
use crate::shop::cart_list::CartListState;
use crate::shop::models::DataLoadingStatus;
use crate::shop::product::ProductState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListState {
    pub status: DataLoadingStatus,
    pub should_open_cart: bool,
    /// Present while the cart sheet is shown.
    pub cart: Option<CartListState>,
    pub products: IdentifiedVec<ProductState>,
}

impl ProductListState {
    pub fn should_show_error(&self) -> bool {
        self.status == DataLoadingStatus::Error
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}

impl FeatureState for ProductListState {}
