//! Background write-through persistence for the cart.
//!
//! Mutations enqueue full versioned snapshots; a single writer task
//! serializes and stores them in order, coalescing bursts down to the
//! newest snapshot. A failed write never blocks or rolls back the
//! in-memory cart.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::cart::CartItem;
use crate::storage::KeyValueStorage;

/// Fixed storage key for the serialized cart list.
///
/// Matches previously persisted carts — once published, do not rename.
pub const CART_STORAGE_KEY: &str = "GoMarketplace:product";

/// A full copy of the cart list as of mutation `version`.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub version: u64,
    pub items: Vec<CartItem>,
}

/// Latest observed outcome of the writer task.
#[derive(Debug, Clone, Default)]
pub struct PersistStatus {
    /// Highest mutation version whose write attempt has completed.
    pub version: u64,
    /// Error message from that attempt, if it failed.
    pub error: Option<String>,
}

impl PersistStatus {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Start the writer task. Returns the snapshot queue and the status feed.
///
/// The task runs until every sender handle is dropped.
pub(crate) fn spawn_writer(
    storage: Arc<dyn KeyValueStorage>,
) -> (
    mpsc::UnboundedSender<Snapshot>,
    watch::Receiver<PersistStatus>,
) {
    let (snap_tx, snap_rx) = mpsc::unbounded_channel();
    let (status_tx, status_rx) = watch::channel(PersistStatus::default());
    tokio::spawn(writer_loop(storage, snap_rx, status_tx));
    (snap_tx, status_rx)
}

async fn writer_loop(
    storage: Arc<dyn KeyValueStorage>,
    mut snap_rx: mpsc::UnboundedReceiver<Snapshot>,
    status_tx: watch::Sender<PersistStatus>,
) {
    while let Some(mut snapshot) = snap_rx.recv().await {
        // Coalesce: every write is the full list, so only the newest
        // queued snapshot matters.
        while let Ok(newer) = snap_rx.try_recv() {
            snapshot = newer;
        }

        let status = match write_snapshot(storage.as_ref(), &snapshot).await {
            Ok(()) => {
                debug!(
                    version = snapshot.version,
                    items = snapshot.items.len(),
                    "Cart snapshot persisted"
                );
                PersistStatus {
                    version: snapshot.version,
                    error: None,
                }
            }
            Err(message) => {
                warn!(
                    version = snapshot.version,
                    error = %message,
                    "Failed to persist cart snapshot"
                );
                PersistStatus {
                    version: snapshot.version,
                    error: Some(message),
                }
            }
        };

        // Nobody may be watching; persistence stays best-effort either way.
        let _ = status_tx.send(status);
    }

    debug!("Cart writer stopped");
}

async fn write_snapshot(
    storage: &dyn KeyValueStorage,
    snapshot: &Snapshot,
) -> Result<(), String> {
    let payload = serde_json::to_string(&snapshot.items).map_err(|e| e.to_string())?;
    storage
        .set(CART_STORAGE_KEY, &payload)
        .await
        .map_err(|e| e.to_string())
}
