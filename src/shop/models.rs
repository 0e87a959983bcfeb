//! Domain data exchanged with the store backend.

use serde::{Deserialize, Serialize, Serializer};

use crate::dependencies::ApiError;

/// Catalogue entry as served by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    #[serde(rename = "image")]
    pub image_url: String,
}

impl Product {
    /// Decode the backend's product list payload.
    pub fn decode_list(json: &str) -> Result<Vec<Product>, ApiError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn samples() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                title: "(demo) Mens Casual Premium Slim Fit T-Shirts".to_string(),
                price: 22.3,
                description: "Slim-fitting style, contrast raglan long sleeve, three-button henley placket.".to_string(),
                category: "men's clothing".to_string(),
                image_url: "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg".to_string(),
            },
            Product {
                id: 2,
                title: "(demo) Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops".to_string(),
                price: 109.95,
                description: "Your perfect pack for everyday use and walks in the forest.".to_string(),
                category: "men's clothing".to_string(),
                image_url: "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg".to_string(),
            },
            Product {
                id: 3,
                title: "(demo) Mens Cotton Jacket".to_string(),
                price: 55.99,
                description: "Great outerwear jackets for Spring/Autumn/Winter.".to_string(),
                category: "men's clothing".to_string(),
                image_url: "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg".to_string(),
            },
        ]
    }
}

/// A product and how many of it the user wants.
///
/// Serializes to the order payload shape `{"productId": .., "quantity": ..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }

    /// Encode lines as the order submission body.
    pub fn encode_order(lines: &[CartLine]) -> Result<String, ApiError> {
        Ok(serde_json::to_string(lines)?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderLine {
    product_id: u64,
    quantity: u32,
}

impl Serialize for CartLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OrderLine {
            product_id: self.product.id,
            quantity: self.quantity,
        }
        .serialize(serializer)
    }
}

/// The signed-in user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ProfilePayload")]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
struct ProfilePayload {
    id: u64,
    email: String,
    name: NamePayload,
}

#[derive(Deserialize)]
struct NamePayload {
    firstname: String,
    lastname: String,
}

impl From<ProfilePayload> for UserProfile {
    fn from(payload: ProfilePayload) -> Self {
        Self {
            id: payload.id,
            email: payload.email,
            first_name: payload.name.firstname,
            last_name: payload.name.lastname,
        }
    }
}

impl UserProfile {
    /// Decode the backend's user payload, where the name is a nested object.
    pub fn decode(json: &str) -> Result<UserProfile, ApiError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn sample() -> UserProfile {
        UserProfile {
            id: 1,
            email: "hello@demo.com".to_string(),
            first_name: "Pedro".to_string(),
            last_name: "Rojas".to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Progress of a request owned by a feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataLoadingStatus {
    #[default]
    NotStarted,
    Loading,
    Success,
    Error,
}

impl DataLoadingStatus {
    pub fn is_loading(self) -> bool {
        self == DataLoadingStatus::Loading
    }
}
