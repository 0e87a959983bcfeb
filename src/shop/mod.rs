//! The shopping app's feature tree.
//!
//! ```text
//! root
//! ├── product_list
//! │   ├── product[id] ── stepper
//! │   └── cart? (cart_list)
//! │       └── cart_item[id]
//! └── profile
//! ```

pub mod cart_item;
pub mod cart_list;
pub mod models;
pub mod product;
pub mod product_list;
pub mod profile;
pub mod prompt;
pub mod root;
pub mod stepper;
