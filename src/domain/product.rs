use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique key of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a non-negative unit price.
///
/// Wraps `rust_decimal::Decimal` so that a negative price can never reach the catalog.
/// Deserialization goes through [`Price::new`] as well.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::InvalidPrice(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, or `AmountOverflow` past `Decimal::MAX`.
    pub fn amount_for(self, quantity: u64) -> Result<Decimal, LedgerError> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .ok_or(LedgerError::AmountOverflow)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// A catalog record.
///
/// `quantity` is unsigned, and every method that lowers it checks the current
/// stock first, so a product can never hold negative stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Price,
    pub description: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        quantity: u32,
        price: Price,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            price,
            description: description.into(),
        }
    }

    /// Removes `amount` units from stock and returns what remains.
    pub fn decrement(&mut self, amount: u32) -> Result<u32, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidQuantity {
                requested: amount,
                available: self.quantity,
            });
        }
        if amount > self.quantity {
            return Err(LedgerError::InsufficientStock {
                requested: amount,
                available: self.quantity,
            });
        }
        self.quantity -= amount;
        Ok(self.quantity)
    }

    /// Checks a deletion request against current stock.
    ///
    /// Deletions report `InvalidQuantity` rather than `InsufficientStock` when
    /// they ask for more than is on hand.
    pub fn validate_deletion(&self, amount: u32) -> Result<(), LedgerError> {
        if amount == 0 || amount > self.quantity {
            Err(LedgerError::InvalidQuantity {
                requested: amount,
                available: self.quantity,
            })
        } else {
            Ok(())
        }
    }

    pub fn is_drained(&self) -> bool {
        self.quantity == 0
    }
}
