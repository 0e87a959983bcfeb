//! Actions for one cart line.

use crate::runtime::Action;
use crate::shop::models::Product;

#[derive(Debug, Clone, PartialEq)]
pub enum CartItemAction {
    /// Delete button. The cart list removes the line; the product list
    /// resets the matching row.
    Delete { product: Product },
}

impl Action for CartItemAction {}
