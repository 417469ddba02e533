//! Consumer-facing cart store: hydration, serialized mutations, and
//! write-through persistence.
//!
//! `CartStore` is a cloneable handle over one authoritative state. Pass
//! clones to whatever needs the cart instead of reaching for a global.
//! Mutations take the write lock, apply, and release before the storage
//! write is even queued — rapid successive calls from any number of tasks
//! serialize correctly and never observe a stale list.

use std::sync::{Arc, RwLock};

use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use crate::cart::{CartError, CartItem, CartState, NewItem};
use crate::persist::{self, PersistStatus, Snapshot, CART_STORAGE_KEY};
use crate::storage::KeyValueStorage;

/// Cloneable handle to the cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<RwLock<Inner>>,
    snap_tx: mpsc::UnboundedSender<Snapshot>,
    status_rx: watch::Receiver<PersistStatus>,
}

struct Inner {
    state: CartState,
    /// Monotonic mutation counter; snapshot versions come from here.
    version: u64,
}

impl Inner {
    fn snapshot(&mut self) -> Snapshot {
        self.version += 1;
        Snapshot {
            version: self.version,
            items: self.state.items().to_vec(),
        }
    }
}

impl CartStore {
    /// Load the persisted cart from `storage` and start the background
    /// writer.
    ///
    /// A missing, empty, or malformed blob yields an empty cart —
    /// hydration never fails on bad stored data, it logs and moves on.
    pub async fn hydrate(storage: Arc<dyn KeyValueStorage>) -> Self {
        let state = match storage.get(CART_STORAGE_KEY).await {
            Ok(Some(blob)) if !blob.trim().is_empty() => {
                match serde_json::from_str::<Vec<CartItem>>(&blob) {
                    Ok(items) => {
                        info!(items = items.len(), "Cart hydrated from storage");
                        CartState::from_items(items)
                    }
                    Err(e) => {
                        warn!(error = %e, "Persisted cart is malformed, starting empty");
                        CartState::new()
                    }
                }
            }
            Ok(_) => CartState::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                CartState::new()
            }
        };

        let (snap_tx, status_rx) = persist::spawn_writer(storage);
        Self {
            inner: Arc::new(RwLock::new(Inner { state, version: 0 })),
            snap_tx,
            status_rx,
        }
    }

    /// Current cart contents, in insertion order.
    ///
    /// This is a snapshot; it does not change under later mutations.
    pub fn products(&self) -> Vec<CartItem> {
        self.inner
            .read()
            .expect("cart state lock poisoned")
            .state
            .items()
            .to_vec()
    }

    /// Add a product, merging by id. Returns the resulting quantity.
    pub fn add_to_cart(&self, candidate: NewItem) -> u32 {
        let (quantity, snapshot) = {
            let mut inner = self.inner.write().expect("cart state lock poisoned");
            let quantity = inner.state.add(candidate);
            (quantity, inner.snapshot())
        };
        self.enqueue(snapshot);
        quantity
    }

    /// Bump the quantity of a product already in the cart.
    ///
    /// # Errors
    /// `ItemNotFound` if the id is absent; nothing is mutated or persisted.
    pub fn increment(&self, id: &str) -> Result<u32, CartError> {
        let (quantity, snapshot) = {
            let mut inner = self.inner.write().expect("cart state lock poisoned");
            let quantity = inner.state.increment(id)?;
            (quantity, inner.snapshot())
        };
        self.enqueue(snapshot);
        Ok(quantity)
    }

    /// Drop the quantity of a product, removing it at zero.
    ///
    /// Returns the new quantity, or `None` when the entry was removed.
    ///
    /// # Errors
    /// `ItemNotFound` if the id is absent; nothing is mutated or persisted.
    pub fn decrement(&self, id: &str) -> Result<Option<u32>, CartError> {
        let (quantity, snapshot) = {
            let mut inner = self.inner.write().expect("cart state lock poisoned");
            let quantity = inner.state.decrement(id)?;
            (quantity, inner.snapshot())
        };
        self.enqueue(snapshot);
        Ok(quantity)
    }

    /// Watch the background writer's progress and failures.
    pub fn persistence(&self) -> watch::Receiver<PersistStatus> {
        self.status_rx.clone()
    }

    /// Wait until every mutation issued so far has had a write attempt.
    ///
    /// # Errors
    /// Surfaces the error of the newest attempt if it failed.
    pub async fn flush(&self) -> Result<(), CartError> {
        let target = self
            .inner
            .read()
            .expect("cart state lock poisoned")
            .version;

        let mut status_rx = self.status_rx.clone();
        loop {
            let status = status_rx.borrow_and_update().clone();
            if status.version >= target {
                return match status.error {
                    None => Ok(()),
                    Some(message) => Err(CartError::Persist { message }),
                };
            }
            if status_rx.changed().await.is_err() {
                return Err(CartError::Persist {
                    message: "cart writer stopped before catching up".to_string(),
                });
            }
        }
    }

    fn enqueue(&self, snapshot: Snapshot) {
        // The writer only stops once every handle is dropped, so this send
        // cannot fail while `self` is alive.
        let _ = self.snap_tx.send(snapshot);
    }
}
