use crate::application::engine::CommerceEngine;
use crate::application::payment::PaymentPolicy;
use crate::domain::customer::CustomerKey;
use crate::domain::product::ProductId;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub product: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRow {
    pub customer: CustomerKey,
    pub name: String,
    pub orders: usize,
    pub cart_lines: usize,
    /// Empty when the amount does not fit in a `Decimal`.
    pub total_owed: Option<Decimal>,
}

/// Final state of an engine: the catalog and each customer's standing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub policy: PaymentPolicy,
    pub products: Vec<ProductRow>,
    pub customers: Vec<CustomerRow>,
}

impl Report {
    pub async fn collect(engine: &CommerceEngine) -> Result<Self> {
        let products = engine
            .list_products()
            .await?
            .into_iter()
            .map(|p| ProductRow {
                product: p.id,
                name: p.name,
                quantity: p.quantity,
                price: p.price.value().normalize(),
                description: p.description,
            })
            .collect();

        let mut customers = Vec::new();
        for key in engine.directory().keys().await {
            let customer = engine.resolve_customer(&key).await?;
            let total_owed = match engine.total_owed(&key).await {
                Ok(total) => Some(total.normalize()),
                Err(LedgerError::AmountOverflow) => None,
                Err(err) => return Err(err),
            };
            customers.push(CustomerRow {
                customer: key,
                name: customer.display_name,
                orders: customer.ledger.len(),
                cart_lines: customer.cart.len(),
                total_owed,
            });
        }

        Ok(Self {
            policy: engine.payments().policy(),
            products,
            customers,
        })
    }
}
