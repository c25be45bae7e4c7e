use super::catalog::ProductCatalog;
use super::directory::CustomerDirectory;
use super::locking::LockPolicy;
use crate::domain::customer::{CartLine, CustomerKey};
use crate::domain::ledger::OrderRecord;
use crate::domain::product::{Price, ProductId};
use crate::error::{LedgerError, Result};

/// A request to order `quantity` units of a product for a customer.
///
/// `price_override` and `description` only shape the cart line snapshot; the
/// catalog values are used when they are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub customer: CustomerKey,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price_override: Option<Price>,
    pub description: Option<String>,
}

impl OrderRequest {
    pub fn new(customer: impl Into<CustomerKey>, product_id: ProductId, quantity: u32) -> Self {
        Self {
            customer: customer.into(),
            product_id,
            quantity,
            price_override: None,
            description: None,
        }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price_override = Some(price);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Places orders: decrements stock, writes the cart line and appends the
/// ledger entry as one unit.
#[derive(Clone)]
pub struct CartManager {
    catalog: ProductCatalog,
    directory: CustomerDirectory,
    locks: LockPolicy,
}

impl CartManager {
    pub fn new(catalog: ProductCatalog, directory: CustomerDirectory) -> Self {
        let locks = directory.locks();
        Self {
            catalog,
            directory,
            locks,
        }
    }

    /// Places an order.
    ///
    /// Checks run in a fixed order (customer, product, stock) and nothing is
    /// written unless all of them pass.
    pub async fn place_order(&self, request: OrderRequest) -> Result<OrderRecord> {
        let customer_slot = self.directory.slot(&request.customer).await?;
        let product_slot = self.catalog.slot(request.product_id).await?;

        let mut entry = self.locks.write(&product_slot).await?;
        let product = entry
            .as_mut()
            .ok_or(LedgerError::ProductNotFound(request.product_id))?;
        if request.quantity == 0 {
            return Err(LedgerError::InvalidQuantity {
                requested: 0,
                available: product.quantity,
            });
        }
        if request.quantity > product.quantity {
            return Err(LedgerError::InsufficientStock {
                requested: request.quantity,
                available: product.quantity,
            });
        }

        let mut customer = self.locks.write(&customer_slot).await?;
        product.decrement(request.quantity)?;
        let line = CartLine {
            product_id: product.id,
            name: product.name.clone(),
            quantity: request.quantity,
            price: request.price_override.unwrap_or(product.price),
            description: request
                .description
                .unwrap_or_else(|| product.description.clone()),
        };
        Ok(customer.record_order(line))
    }

    /// The customer's current cart, ordered by product id.
    pub async fn cart(&self, key: &CustomerKey) -> Result<Vec<CartLine>> {
        let customer = self.directory.resolve(key).await?;
        Ok(customer.cart.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::OrderKind;
    use crate::domain::product::Product;
    use crate::infrastructure::in_memory::{InMemoryCustomerRepository, InMemoryProductRepository};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    async fn setup() -> (CartManager, ProductCatalog, CustomerDirectory) {
        let directory = CustomerDirectory::new(
            Arc::new(InMemoryCustomerRepository::new()),
            LockPolicy::default(),
        );
        let catalog = ProductCatalog::new(
            Arc::new(InMemoryProductRepository::new()),
            directory.clone(),
        );
        let book = Product::new(
            ProductId(1),
            "Book",
            10,
            Price::new(dec!(9.99)).unwrap(),
            "hardcover",
        );
        catalog.create_or_replace(book, None).await.unwrap();
        directory
            .register(CustomerKey::new("alice"), "Alice")
            .await
            .unwrap();
        let cart = CartManager::new(catalog.clone(), directory.clone());
        (cart, catalog, directory)
    }

    #[tokio::test]
    async fn test_place_order_updates_all_three() {
        let (cart, catalog, directory) = setup().await;

        let record = cart
            .place_order(OrderRequest::new("alice", ProductId(1), 3))
            .await
            .unwrap();
        assert_eq!(record.quantity, 3);
        assert_eq!(record.kind, OrderKind::Ordered);
        assert_eq!(record.product_name, "Book");

        assert_eq!(catalog.current_quantity(ProductId(1)).await.unwrap(), 7);
        let alice = directory.resolve(&CustomerKey::new("alice")).await.unwrap();
        assert_eq!(alice.ledger.len(), 1);
        assert_eq!(alice.cart[&ProductId(1)].description, "hardcover");
    }

    #[tokio::test]
    async fn test_cart_line_uses_overrides() {
        let (cart, _, _) = setup().await;
        let request = OrderRequest::new("alice", ProductId(1), 1)
            .with_price(Price::new(dec!(5)).unwrap())
            .with_description("gift");
        cart.place_order(request).await.unwrap();

        let lines = cart.cart(&CustomerKey::new("alice")).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].price.value(), dec!(5));
        assert_eq!(lines[0].description, "gift");
    }

    #[tokio::test]
    async fn test_cart_line_is_a_snapshot() {
        let (cart, catalog, _) = setup().await;
        cart.place_order(OrderRequest::new("alice", ProductId(1), 2))
            .await
            .unwrap();
        catalog
            .set_price(ProductId(1), Price::new(dec!(1)).unwrap())
            .await
            .unwrap();

        let lines = cart.cart(&CustomerKey::new("alice")).await.unwrap();
        assert_eq!(lines[0].price.value(), dec!(9.99));
    }

    #[tokio::test]
    async fn test_failure_order_and_no_mutation() {
        let (cart, catalog, directory) = setup().await;

        // Unknown customer wins over unknown product.
        let result = cart
            .place_order(OrderRequest::new("bob", ProductId(99), 1))
            .await;
        assert!(matches!(result, Err(LedgerError::CustomerNotFound(_))));

        let result = cart
            .place_order(OrderRequest::new("alice", ProductId(99), 1))
            .await;
        assert!(matches!(result, Err(LedgerError::ProductNotFound(_))));

        let result = cart
            .place_order(OrderRequest::new("alice", ProductId(1), 11))
            .await;
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientStock {
                requested: 11,
                available: 10
            })
        ));

        let result = cart
            .place_order(OrderRequest::new("alice", ProductId(1), 0))
            .await;
        assert!(matches!(result, Err(LedgerError::InvalidQuantity { .. })));

        assert_eq!(catalog.current_quantity(ProductId(1)).await.unwrap(), 10);
        let alice = directory.resolve(&CustomerKey::new("alice")).await.unwrap();
        assert!(alice.ledger.is_empty());
        assert!(alice.cart.is_empty());
    }
}
