//! Cart domain model: line items and the pure reconciliation state.

mod item;
mod state;

use thiserror::Error;

pub use item::{CartItem, NewItem};
pub use state::CartState;

/// Errors surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Increment/decrement addressed an id that is not in the cart.
    /// The list is left untouched.
    #[error("Item '{id}' not found in cart")]
    ItemNotFound { id: String },

    /// The background writer failed to persist the latest snapshot.
    #[error("Failed to persist cart: {message}")]
    Persist { message: String },
}
