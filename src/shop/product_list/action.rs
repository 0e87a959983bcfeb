//! Actions for the product catalogue screen.

use uuid::Uuid;

use crate::dependencies::ApiError;
use crate::runtime::Action;
use crate::shop::cart_list::CartListAction;
use crate::shop::models::Product;
use crate::shop::product::ProductAction;

#[derive(Debug, Clone, PartialEq)]
pub enum ProductListAction {
    /// Load the catalogue unless it is loading or already loaded.
    FetchProducts,

    ProductsResponse(Result<Vec<Product>, ApiError>),

    /// Present (`true`) or dismiss (`false`) the cart sheet.
    SetCartView(bool),

    /// Forwarded to the presented cart sheet.
    Cart(CartListAction),

    /// Forwarded to the row with the given id.
    Product(Uuid, ProductAction),

    /// Zero the count of the row showing `product`.
    ResetProduct { product: Product },

    CloseCart,
}

impl Action for ProductListAction {}
