//! Local shopping-cart state container with write-through persistence.
//!
//! The cart lives in memory as an ordered list of line items merged by
//! product id. Every mutation enqueues a full snapshot to a background
//! writer that stores it under a single fixed key in a pluggable
//! key/value store. Consumers hold a cloneable [`CartStore`] handle
//! instead of reaching for a global.
//!
//! ```no_run
//! use std::sync::Arc;
//! use gocart::{CartStore, MemoryStorage, NewItem};
//!
//! # async fn demo() {
//! let storage = Arc::new(MemoryStorage::new());
//! let cart = CartStore::hydrate(storage).await;
//! cart.add_to_cart(NewItem {
//!     id: "p1".into(),
//!     title: "Shirt".into(),
//!     image_url: "https://example.com/shirt.png".into(),
//!     price: 10.0,
//! });
//! # }
//! ```

pub mod cart;
pub mod config;
pub mod persist;
pub mod storage;
pub mod store;

pub use cart::{CartError, CartItem, CartState, NewItem};
pub use config::{CartConfig, ConfigError};
pub use persist::{PersistStatus, CART_STORAGE_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::CartStore;
