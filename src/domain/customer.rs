use super::ledger::{OrderKind, OrderLedger, OrderRecord};
use super::product::{Price, Product, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical customer identifier.
///
/// Customers are keyed by one value only; callers resolve names or ids to a
/// `CustomerKey` before reaching the engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerKey(String);

impl CustomerKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CustomerKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Snapshot of a product taken when an order was placed.
///
/// Later catalog edits do not touch existing cart lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Price,
    pub description: String,
}

/// A customer profile with its pending cart and its order ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub key: CustomerKey,
    pub display_name: String,
    pub cart: BTreeMap<ProductId, CartLine>,
    pub ledger: OrderLedger,
}

impl Customer {
    pub fn new(key: CustomerKey, display_name: impl Into<String>) -> Self {
        Self {
            key,
            display_name: display_name.into(),
            cart: BTreeMap::new(),
            ledger: OrderLedger::new(),
        }
    }

    /// Records an order: replaces the cart line for the product and appends
    /// the matching ledger entry.
    pub fn record_order(&mut self, line: CartLine) -> OrderRecord {
        let record = OrderRecord::new(line.product_id, &line.name, line.quantity, OrderKind::Ordered);
        self.cart.insert(line.product_id, line);
        self.ledger.append(record.clone());
        record
    }

    /// Records stock the customer added to (or drained from) the catalog.
    /// No cart line is created.
    pub fn record_movement(&mut self, product: &Product, quantity: u32, kind: OrderKind) -> OrderRecord {
        let record = OrderRecord::new(product.id, &product.name, quantity, kind);
        self.ledger.append(record.clone());
        record
    }
}
