mod common;

use std::sync::Arc;

use common::FlakyStorage;
use gocart::{CartError, CartItem, CartStore, NewItem, CART_STORAGE_KEY};

fn candidate(id: &str) -> NewItem {
    NewItem {
        id: id.to_string(),
        title: format!("Product {id}"),
        image_url: "u".to_string(),
        price: 10.0,
    }
}

#[tokio::test]
async fn write_failure_is_surfaced_by_flush_but_not_by_mutations() {
    let storage = Arc::new(FlakyStorage::new());
    let cart = CartStore::hydrate(storage.clone()).await;
    storage.set_failing(true);

    // The mutation itself succeeds; persistence is best-effort.
    let quantity = cart.add_to_cart(candidate("p1"));
    assert_eq!(quantity, 1);
    assert_eq!(cart.products().len(), 1);

    assert!(matches!(
        cart.flush().await,
        Err(CartError::Persist { .. })
    ));
    assert_eq!(storage.writes(), 0);
}

#[tokio::test]
async fn write_failure_is_observable_on_the_status_feed() {
    let storage = Arc::new(FlakyStorage::new());
    let cart = CartStore::hydrate(storage.clone()).await;
    storage.set_failing(true);

    let mut status_rx = cart.persistence();
    cart.add_to_cart(candidate("p1"));
    let _ = cart.flush().await;

    let status = status_rx.borrow_and_update().clone();
    assert!(!status.is_ok());
    assert!(status.version >= 1);
}

#[tokio::test]
async fn writer_recovers_once_storage_heals() {
    let storage = Arc::new(FlakyStorage::new());
    let cart = CartStore::hydrate(storage.clone()).await;

    storage.set_failing(true);
    cart.add_to_cart(candidate("p1"));
    assert!(cart.flush().await.is_err());

    storage.set_failing(false);
    cart.increment("p1").unwrap();
    cart.flush().await.unwrap();

    let blob = storage.snapshot(CART_STORAGE_KEY).unwrap();
    let persisted: Vec<CartItem> = serde_json::from_str(&blob).unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].quantity, 2);
}

#[tokio::test]
async fn burst_of_mutations_coalesces_into_few_writes() {
    let storage = Arc::new(FlakyStorage::new());
    let cart = CartStore::hydrate(storage.clone()).await;

    for _ in 0..50 {
        cart.add_to_cart(candidate("p1"));
    }
    cart.flush().await.unwrap();

    // Coalescing is timing-dependent, but the writer can never need more
    // writes than mutations, and the last write must carry the final list.
    assert!(storage.writes() >= 1);
    assert!(storage.writes() <= 50);
    let blob = storage.snapshot(CART_STORAGE_KEY).unwrap();
    let persisted: Vec<CartItem> = serde_json::from_str(&blob).unwrap();
    assert_eq!(persisted[0].quantity, 50);
}
