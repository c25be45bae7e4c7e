use crate::domain::customer::{Customer, CustomerKey};
use crate::domain::ports::{CustomerRepository, CustomerSlot, ProductRepository, ProductSlot};
use crate::domain::product::ProductId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory product repository.
///
/// The outer `RwLock` only guards the id → slot map and is held just long
/// enough to clone a slot handle. Each product is locked through its own slot.
/// Memory is bounded by the distinct product ids seen, one empty slot per
/// removed id.
#[derive(Default, Clone)]
pub struct InMemoryProductRepository {
    slots: Arc<RwLock<HashMap<ProductId, ProductSlot>>>,
}

impl InMemoryProductRepository {
    /// Creates a new, empty in-memory product repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn slot_or_insert(&self, id: ProductId) -> ProductSlot {
        if let Some(slot) = self.slot(id).await {
            return slot;
        }
        let mut slots = self.slots.write().await;
        slots
            .entry(id)
            .or_insert_with(|| Arc::new(RwLock::new(None)))
            .clone()
    }

    async fn slot(&self, id: ProductId) -> Option<ProductSlot> {
        let slots = self.slots.read().await;
        slots.get(&id).cloned()
    }

    async fn slots(&self) -> Vec<ProductSlot> {
        let slots = self.slots.read().await;
        slots.values().cloned().collect()
    }
}

/// A thread-safe in-memory customer repository.
///
/// Same layout as [`InMemoryProductRepository`]: a map of independently
/// lockable customer slots.
#[derive(Default, Clone)]
pub struct InMemoryCustomerRepository {
    slots: Arc<RwLock<HashMap<CustomerKey, CustomerSlot>>>,
}

impl InMemoryCustomerRepository {
    /// Creates a new, empty in-memory customer repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert_if_absent(&self, customer: Customer) -> (CustomerSlot, bool) {
        let mut slots = self.slots.write().await;
        if let Some(existing) = slots.get(&customer.key) {
            return (existing.clone(), false);
        }
        let key = customer.key.clone();
        let slot = Arc::new(RwLock::new(customer));
        slots.insert(key, slot.clone());
        (slot, true)
    }

    async fn slot(&self, key: &CustomerKey) -> Option<CustomerSlot> {
        let slots = self.slots.read().await;
        slots.get(key).cloned()
    }

    async fn keys(&self) -> Vec<CustomerKey> {
        let slots = self.slots.read().await;
        let mut keys: Vec<CustomerKey> = slots.keys().cloned().collect();
        keys.sort();
        keys
    }
}
