//! Actions for the app root.

use crate::runtime::Action;
use crate::shop::product_list::ProductListAction;
use crate::shop::profile::ProfileAction;

use super::state::Tab;

#[derive(Debug, Clone, PartialEq)]
pub enum RootAction {
    SelectTab(Tab),
    ProductList(ProductListAction),
    Profile(ProfileAction),
}

impl Action for RootAction {}
