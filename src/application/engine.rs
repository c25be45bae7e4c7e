use super::cart::{CartManager, OrderRequest};
use super::catalog::{Deletion, ProductCatalog};
use super::config::EngineConfig;
use super::directory::CustomerDirectory;
use super::locking::LockPolicy;
use super::payment::{PaymentAggregator, PaymentPolicy, PaymentSummary};
use crate::domain::customer::{CartLine, Customer, CustomerKey};
use crate::domain::ledger::OrderRecord;
use crate::domain::ports::{CustomerRepositoryRef, ProductRepositoryRef};
use crate::domain::product::{Price, Product, ProductId};
use crate::error::Result;
use crate::infrastructure::in_memory::{InMemoryCustomerRepository, InMemoryProductRepository};
use rust_decimal::Decimal;
use std::sync::Arc;

/// The main entry point of the catalog and ledger engine.
///
/// `CommerceEngine` wires the catalog, the customer directory, order
/// placement and payment aggregation over one pair of repositories. Every call
/// either succeeds or returns a typed error with no partial write visible.
/// The engine never prints or logs; that is left to the caller.
#[derive(Clone)]
pub struct CommerceEngine {
    catalog: ProductCatalog,
    directory: CustomerDirectory,
    cart: CartManager,
    payments: PaymentAggregator,
    config: EngineConfig,
}

impl CommerceEngine {
    /// Creates a new `CommerceEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `products` - The store for product records.
    /// * `customers` - The store for customer profiles and their ledgers.
    /// * `config` - Payment policy and lock timeout.
    pub fn new(
        products: ProductRepositoryRef,
        customers: CustomerRepositoryRef,
        config: EngineConfig,
    ) -> Self {
        let directory = CustomerDirectory::new(customers, LockPolicy::new(config.lock_timeout));
        let catalog = ProductCatalog::new(products, directory.clone());
        let cart = CartManager::new(catalog.clone(), directory.clone());
        let payments = PaymentAggregator::new(
            catalog.clone(),
            directory.clone(),
            config.payment_policy,
        );
        Self {
            catalog,
            directory,
            cart,
            payments,
            config,
        }
    }

    /// Creates an engine backed by fresh in-memory repositories.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryCustomerRepository::new()),
            config,
        )
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn directory(&self) -> &CustomerDirectory {
        &self.directory
    }

    pub fn payments(&self) -> &PaymentAggregator {
        &self.payments
    }

    pub async fn create_or_replace_product(
        &self,
        product: Product,
        owner: Option<&CustomerKey>,
    ) -> Result<Option<Product>> {
        self.catalog.create_or_replace(product, owner).await
    }

    pub async fn set_quantity(&self, id: ProductId, quantity: u32) -> Result<()> {
        self.catalog.set_quantity(id, quantity).await
    }

    pub async fn rename_product(&self, id: ProductId, name: &str) -> Result<()> {
        self.catalog.rename(id, name).await
    }

    pub async fn set_price(&self, id: ProductId, price: Price) -> Result<()> {
        self.catalog.set_price(id, price).await
    }

    pub async fn delete_product(
        &self,
        id: ProductId,
        quantity: u32,
        owner: Option<&CustomerKey>,
    ) -> Result<Deletion> {
        self.catalog.delete(id, quantity, owner).await
    }

    pub async fn check_availability(&self, id: ProductId) -> Result<bool> {
        self.catalog.exists(id).await
    }

    pub async fn current_quantity(&self, id: ProductId) -> Result<u32> {
        self.catalog.current_quantity(id).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.catalog.list().await
    }

    pub async fn register_customer(&self, key: CustomerKey, display_name: &str) -> Result<bool> {
        self.directory.register(key, display_name).await
    }

    pub async fn resolve_customer(&self, key: &CustomerKey) -> Result<Customer> {
        self.directory.resolve(key).await
    }

    pub async fn place_order(&self, request: OrderRequest) -> Result<OrderRecord> {
        self.cart.place_order(request).await
    }

    pub async fn cart(&self, key: &CustomerKey) -> Result<Vec<CartLine>> {
        self.cart.cart(key).await
    }

    pub async fn total_owed(&self, key: &CustomerKey) -> Result<Decimal> {
        self.payments.total_owed(key).await
    }

    pub async fn total_owed_with(&self, key: &CustomerKey, policy: PaymentPolicy) -> Result<Decimal> {
        self.payments.total_owed_with(key, policy).await
    }

    pub async fn payment_summary(&self, key: &CustomerKey) -> Result<PaymentSummary> {
        self.payments.summary(key).await
    }

    pub async fn order_history(&self, key: &CustomerKey) -> Result<Vec<OrderRecord>> {
        self.payments.order_history(key).await
    }
}
