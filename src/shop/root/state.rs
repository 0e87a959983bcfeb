//! State for the app root.

use crate::runtime::FeatureState;
use crate::shop::product_list::ProductListState;
use crate::shop::profile::ProfileState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Products,
    Profile,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub selected_tab: Tab,
    pub product_list: ProductListState,
    pub profile: ProfileState,
}

impl FeatureState for RootState {}
