use super::product::ProductId;
use serde::{Deserialize, Serialize};

/// What kind of stock movement produced a ledger entry.
///
/// Informational only: payment aggregation treats every kind the same way.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// The customer added stock to the catalog.
    Stocked,
    /// The customer placed an order against the catalog.
    Ordered,
    /// The customer drained stock through a deletion.
    Withdrawn,
}

/// One stock-affecting event attributed to a customer.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct OrderRecord {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub kind: OrderKind,
}

impl OrderRecord {
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: u32,
        kind: OrderKind,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            kind,
        }
    }
}

/// Append-only, insertion-ordered log of a customer's [`OrderRecord`]s.
///
/// A record's index is its sequence position; nothing is ever removed or reordered.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderLedger {
    records: Vec<OrderRecord>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its sequence position.
    pub fn append(&mut self, record: OrderRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Records oldest first.
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    /// Records newest first.
    pub fn most_recent_first(&self) -> impl Iterator<Item = &OrderRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_sequence_positions() {
        let mut ledger = OrderLedger::new();
        assert!(ledger.is_empty());
        let first = ledger.append(OrderRecord::new(ProductId(1), "Book", 3, OrderKind::Ordered));
        let second = ledger.append(OrderRecord::new(ProductId(2), "Pen", 1, OrderKind::Stocked));
        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_iteration_orders() {
        let mut ledger = OrderLedger::new();
        ledger.append(OrderRecord::new(ProductId(1), "Book", 3, OrderKind::Ordered));
        ledger.append(OrderRecord::new(ProductId(1), "Book", 2, OrderKind::Ordered));

        let oldest: Vec<u32> = ledger.records().iter().map(|r| r.quantity).collect();
        let newest: Vec<u32> = ledger.most_recent_first().map(|r| r.quantity).collect();
        assert_eq!(oldest, vec![3, 2]);
        assert_eq!(newest, vec![2, 3]);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&OrderKind::Withdrawn).unwrap();
        assert_eq!(json, "\"withdrawn\"");
    }
}
