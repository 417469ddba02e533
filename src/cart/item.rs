//! Cart line-item data model.
//!
//! The serialized field names are the wire format for persisted carts —
//! once published, do not rename.

use serde::{Deserialize, Serialize};

/// One distinct product in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Opaque unique identifier, the merge key.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Product image reference.
    pub image_url: String,
    /// Unit price. Stored, never computed upon.
    pub price: f64,
    /// Count of this product in the cart. Always >= 1 while present.
    pub quantity: u32,
}

/// An add candidate: a product that has no quantity yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: f64,
}

impl NewItem {
    /// Promote to a cart entry with an initial quantity.
    pub fn into_item(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}
