use super::customer::{Customer, CustomerKey};
use super::product::{Product, ProductId};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Independently lockable cell holding one product. `None` means the id is
/// not (or no longer) in the catalog.
pub type ProductSlot = Arc<RwLock<Option<Product>>>;

/// Independently lockable cell holding one customer profile.
pub type CustomerSlot = Arc<RwLock<Customer>>;

pub type ProductRepositoryRef = Arc<dyn ProductRepository>;
pub type CustomerRepositoryRef = Arc<dyn CustomerRepository>;

/// Storage for product slots.
///
/// Implementations must never drop a slot once handed out: removing a product
/// empties its slot instead, so a cloned handle always refers to the live entry.
/// The slot count therefore grows with the number of distinct product ids ever
/// created, not with the live catalog, and [`ProductRepository::slots`] returns
/// the empty slots too. Re-creating a removed id reuses its slot.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns the slot for `id`, creating an empty one if the id is new.
    async fn slot_or_insert(&self, id: ProductId) -> ProductSlot;
    async fn slot(&self, id: ProductId) -> Option<ProductSlot>;
    async fn slots(&self) -> Vec<ProductSlot>;
}

/// Storage for customer slots. Customers are never removed.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Inserts `customer` unless its key is taken. Returns the slot for the
    /// key and whether it was freshly inserted.
    async fn insert_if_absent(&self, customer: Customer) -> (CustomerSlot, bool);
    async fn slot(&self, key: &CustomerKey) -> Option<CustomerSlot>;
    async fn keys(&self) -> Vec<CustomerKey>;
}
