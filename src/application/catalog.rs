use super::directory::CustomerDirectory;
use super::locking::LockPolicy;
use crate::domain::customer::CustomerKey;
use crate::domain::ledger::OrderKind;
use crate::domain::ports::{ProductRepositoryRef, ProductSlot};
use crate::domain::product::{Price, Product, ProductId};
use crate::error::{LedgerError, Result};

/// Result of a successful [`ProductCatalog::delete`].
#[derive(Debug, Clone, PartialEq)]
pub enum Deletion {
    /// Stock was already zero; the record is gone.
    Removed(Product),
    /// Stock was lowered; the record stays, even when `remaining` is zero.
    Drained { deleted: u32, remaining: u32 },
}

/// The authoritative product id → stock record mapping.
///
/// Operations that also write to a customer ledger lock the product before the
/// customer; [`super::cart::CartManager`] follows the same order.
#[derive(Clone)]
pub struct ProductCatalog {
    products: ProductRepositoryRef,
    directory: CustomerDirectory,
    locks: LockPolicy,
}

impl ProductCatalog {
    pub fn new(products: ProductRepositoryRef, directory: CustomerDirectory) -> Self {
        let locks = directory.locks();
        Self {
            products,
            directory,
            locks,
        }
    }

    /// Inserts or overwrites a product and returns the record it replaced.
    ///
    /// With an `owner`, the added quantity is also appended to that customer's
    /// ledger as a [`OrderKind::Stocked`] entry. An unknown owner fails before
    /// anything is written.
    pub async fn create_or_replace(
        &self,
        product: Product,
        owner: Option<&CustomerKey>,
    ) -> Result<Option<Product>> {
        let owner_slot = match owner {
            Some(key) => Some(self.directory.slot(key).await?),
            None => None,
        };

        let slot = self.products.slot_or_insert(product.id).await;
        let mut entry = self.locks.write(&slot).await?;
        let mut customer = match &owner_slot {
            Some(slot) => Some(self.locks.write(slot).await?),
            None => None,
        };

        if let Some(customer) = customer.as_mut() {
            customer.record_movement(&product, product.quantity, OrderKind::Stocked);
        }
        Ok(entry.replace(product))
    }

    pub async fn exists(&self, id: ProductId) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }

    /// Returns a snapshot of the product, if present.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>> {
        let Some(slot) = self.products.slot(id).await else {
            return Ok(None);
        };
        let entry = self.locks.read(&slot).await?;
        Ok(entry.as_ref().cloned())
    }

    /// Stock on hand; an absent product has none.
    pub async fn current_quantity(&self, id: ProductId) -> Result<u32> {
        Ok(self.get(id).await?.map_or(0, |p| p.quantity))
    }

    /// Unit price; an absent product is priced at zero.
    pub async fn current_price(&self, id: ProductId) -> Result<Price> {
        Ok(self.get(id).await?.map_or(Price::ZERO, |p| p.price))
    }

    pub async fn set_quantity(&self, id: ProductId, quantity: u32) -> Result<()> {
        self.update(id, |product| product.quantity = quantity).await
    }

    pub async fn rename(&self, id: ProductId, name: &str) -> Result<()> {
        self.update(id, |product| product.name = name.to_string())
            .await
    }

    pub async fn set_price(&self, id: ProductId, price: Price) -> Result<()> {
        self.update(id, |product| product.price = price).await
    }

    /// Lowers stock by `amount` and returns what remains.
    pub async fn decrement(&self, id: ProductId, amount: u32) -> Result<u32> {
        let slot = self.slot(id).await?;
        let mut entry = self.locks.write(&slot).await?;
        let product = entry.as_mut().ok_or(LedgerError::ProductNotFound(id))?;
        product.decrement(amount)
    }

    /// Deletes stock in two steps.
    ///
    /// While stock remains, `quantity` must be in `1..=stock` and is drained
    /// without removing the record. Once stock is zero, the next call removes
    /// the record whatever `quantity` says. A drain with an `owner` appends a
    /// [`OrderKind::Withdrawn`] ledger entry; the final removal appends nothing.
    pub async fn delete(
        &self,
        id: ProductId,
        quantity: u32,
        owner: Option<&CustomerKey>,
    ) -> Result<Deletion> {
        let owner_slot = match owner {
            Some(key) => Some(self.directory.slot(key).await?),
            None => None,
        };

        let slot = self.slot(id).await?;
        let mut entry = self.locks.write(&slot).await?;
        let product = entry.as_ref().ok_or(LedgerError::ProductNotFound(id))?;

        if product.is_drained() {
            let removed = entry.take().ok_or(LedgerError::ProductNotFound(id))?;
            return Ok(Deletion::Removed(removed));
        }

        product.validate_deletion(quantity)?;
        let mut customer = match &owner_slot {
            Some(slot) => Some(self.locks.write(slot).await?),
            None => None,
        };

        let product = entry.as_mut().ok_or(LedgerError::ProductNotFound(id))?;
        let remaining = product.decrement(quantity)?;
        if let Some(customer) = customer.as_mut() {
            customer.record_movement(product, quantity, OrderKind::Withdrawn);
        }
        Ok(Deletion::Drained {
            deleted: quantity,
            remaining,
        })
    }

    /// Snapshot of every product, ordered by id.
    pub async fn list(&self) -> Result<Vec<Product>> {
        let mut products = Vec::new();
        for slot in self.products.slots().await {
            if let Some(product) = self.locks.read(&slot).await?.as_ref() {
                products.push(product.clone());
            }
        }
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    pub(crate) async fn slot(&self, id: ProductId) -> Result<ProductSlot> {
        self.products
            .slot(id)
            .await
            .ok_or(LedgerError::ProductNotFound(id))
    }

    async fn update(&self, id: ProductId, apply: impl FnOnce(&mut Product)) -> Result<()> {
        let slot = self.slot(id).await?;
        let mut entry = self.locks.write(&slot).await?;
        let product = entry.as_mut().ok_or(LedgerError::ProductNotFound(id))?;
        apply(product);
        Ok(())
    }
}
