use super::catalog::ProductCatalog;
use super::directory::CustomerDirectory;
use crate::domain::customer::CustomerKey;
use crate::domain::ledger::OrderRecord;
use crate::domain::product::{Price, ProductId};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How ledger entries are turned into an amount owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPolicy {
    /// Only the most recent entry per product counts.
    #[default]
    LatestPerProduct,
    /// Every entry counts.
    Cumulative,
}

/// Quantity counted for one product before pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u64,
}

/// Collapses a ledger (oldest first) into one tally per product.
///
/// Tallies come out in the order products are met scanning from the newest
/// entry back to the oldest.
pub fn tally(records: &[OrderRecord], policy: PaymentPolicy) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = Vec::new();
    let mut settled: HashMap<ProductId, usize> = HashMap::new();

    for record in records.iter().rev() {
        match settled.get(&record.product_id) {
            Some(&index) => {
                if policy == PaymentPolicy::Cumulative {
                    tallies[index].quantity += u64::from(record.quantity);
                }
            }
            None => {
                settled.insert(record.product_id, tallies.len());
                tallies.push(Tally {
                    product_id: record.product_id,
                    product_name: record.product_name.clone(),
                    quantity: u64::from(record.quantity),
                });
            }
        }
    }
    tallies
}

/// One priced row of a [`PaymentSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u64,
    pub unit_price: Price,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub customer: CustomerKey,
    pub policy: PaymentPolicy,
    pub lines: Vec<PaymentLine>,
    pub total: Decimal,
}

/// Read-only queries over customer ledgers, priced against the catalog as it
/// is at query time.
///
/// Nothing is cached: every call re-reads the ledger and the current prices.
#[derive(Clone)]
pub struct PaymentAggregator {
    catalog: ProductCatalog,
    directory: CustomerDirectory,
    policy: PaymentPolicy,
}

impl PaymentAggregator {
    pub fn new(catalog: ProductCatalog, directory: CustomerDirectory, policy: PaymentPolicy) -> Self {
        Self {
            catalog,
            directory,
            policy,
        }
    }

    pub fn policy(&self) -> PaymentPolicy {
        self.policy
    }

    /// The customer's ledger, oldest first.
    pub async fn order_history(&self, key: &CustomerKey) -> Result<Vec<OrderRecord>> {
        // The customer lock is released before any product lock is taken.
        let customer = self.directory.resolve(key).await?;
        Ok(customer.ledger.records().to_vec())
    }

    pub async fn total_owed(&self, key: &CustomerKey) -> Result<Decimal> {
        self.total_owed_with(key, self.policy).await
    }

    pub async fn total_owed_with(&self, key: &CustomerKey, policy: PaymentPolicy) -> Result<Decimal> {
        Ok(self.summary_with(key, policy).await?.total)
    }

    pub async fn summary(&self, key: &CustomerKey) -> Result<PaymentSummary> {
        self.summary_with(key, self.policy).await
    }

    /// Prices each tally at the product's current price. A product that has
    /// left the catalog is priced at zero and keeps its ledger name.
    ///
    /// Fails with `AmountOverflow` when a line or the total leaves the
    /// `Decimal` range.
    pub async fn summary_with(&self, key: &CustomerKey, policy: PaymentPolicy) -> Result<PaymentSummary> {
        let history = self.order_history(key).await?;

        let mut lines = Vec::new();
        let mut total = Decimal::ZERO;
        for counted in tally(&history, policy) {
            let (product_name, unit_price) = match self.catalog.get(counted.product_id).await? {
                Some(product) => (product.name, product.price),
                None => (counted.product_name, Price::ZERO),
            };
            let amount = unit_price.amount_for(counted.quantity)?;
            total = total
                .checked_add(amount)
                .ok_or(LedgerError::AmountOverflow)?;
            lines.push(PaymentLine {
                product_id: counted.product_id,
                product_name,
                quantity: counted.quantity,
                unit_price,
                amount,
            });
        }

        Ok(PaymentSummary {
            customer: key.clone(),
            policy,
            lines,
            total,
        })
    }
}
