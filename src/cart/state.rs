//! Pure in-memory cart list with merge-by-id reconciliation.
//!
//! No I/O happens here; [`crate::store::CartStore`] layers locking and
//! persistence on top.

use crate::cart::item::{CartItem, NewItem};
use crate::cart::CartError;

/// Ordered cart list. Order is insertion order of first-seen id, and
/// increment/decrement never reorder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from a hydrated item list.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Current items, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Merge a candidate into the list by id.
    ///
    /// A new id is appended with quantity 1; an existing id has its
    /// quantity bumped in place. Returns the resulting quantity, so there
    /// is exactly one entry per id afterwards either way.
    pub fn add(&mut self, candidate: NewItem) -> u32 {
        match self.items.iter_mut().find(|item| item.id == candidate.id) {
            Some(existing) => {
                existing.quantity += 1;
                existing.quantity
            }
            None => {
                self.items.push(candidate.into_item(1));
                1
            }
        }
    }

    /// Bump the quantity of an existing entry.
    ///
    /// # Errors
    /// Returns `ItemNotFound` if the id is absent. The list is unchanged.
    pub fn increment(&mut self, id: &str) -> Result<u32, CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CartError::ItemNotFound { id: id.to_string() })?;
        item.quantity += 1;
        Ok(item.quantity)
    }

    /// Drop the quantity of an existing entry, removing it at zero.
    ///
    /// Returns the new quantity, or `None` when the entry was removed.
    ///
    /// # Errors
    /// Returns `ItemNotFound` if the id is absent. The list is unchanged.
    pub fn decrement(&mut self, id: &str) -> Result<Option<u32>, CartError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| CartError::ItemNotFound { id: id.to_string() })?;

        if self.items[index].quantity <= 1 {
            self.items.remove(index);
            Ok(None)
        } else {
            self.items[index].quantity -= 1;
            Ok(Some(self.items[index].quantity))
        }
    }
}
