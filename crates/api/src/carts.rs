//! Server-side carts keyed by [`CartId`].
//!
//! Carts live in a `moka` cache with a time-to-idle, so a cart disappears once
//! its browsing session has been quiet for the configured period. Each cart
//! sits behind its own mutex: an add or remove is one read-modify-write under
//! the lock, so concurrent requests against the same cart cannot lose
//! increments.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use moka::future::Cache;

use cafeconnect_core::{Cart, CartId};

/// Upper bound on live carts held by one process.
const MAX_CARTS: u64 = 100_000;

/// Registry of live carts.
#[derive(Clone)]
pub struct CartRegistry {
    carts: Cache<CartId, Arc<Mutex<Cart>>>,
}

impl CartRegistry {
    /// Create a registry whose carts expire after `idle` without access.
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        let carts = Cache::builder()
            .max_capacity(MAX_CARTS)
            .time_to_idle(idle)
            .build();
        Self { carts }
    }

    /// Start a new empty cart.
    pub async fn create(&self) -> CartId {
        let id = CartId::generate();
        self.carts
            .insert(id, Arc::new(Mutex::new(Cart::new())))
            .await;
        id
    }

    /// Copy of the cart's current contents, or `None` if unknown or expired.
    pub async fn snapshot(&self, id: CartId) -> Option<Cart> {
        let cart = self.carts.get(&id).await?;
        let guard = cart.lock().unwrap_or_else(PoisonError::into_inner);
        Some(guard.clone())
    }

    /// Apply `change` to the cart atomically and return its result together
    /// with the cart's contents afterwards.
    ///
    /// Returns `None` if the cart is unknown or expired.
    pub async fn update<R>(
        &self,
        id: CartId,
        change: impl FnOnce(&mut Cart) -> R,
    ) -> Option<(R, Cart)> {
        let cart = self.carts.get(&id).await?;
        let mut guard = cart.lock().unwrap_or_else(PoisonError::into_inner);
        let result = change(&mut guard);
        Some((result, guard.clone()))
    }

    /// Drop a cart. Returns whether it existed.
    pub async fn discard(&self, id: CartId) -> bool {
        self.carts.remove(&id).await.is_some()
    }
}
