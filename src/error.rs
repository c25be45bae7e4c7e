use crate::domain::customer::CustomerKey;
use crate::domain::product::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerKey),
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("Invalid quantity {requested} (current stock: {available})")]
    InvalidQuantity { requested: u32, available: u32 },
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),
    #[error("Amount owed exceeds the representable range")]
    AmountOverflow,
    #[error("Timed out waiting for a lock")]
    LockTimeout,
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Command error: {0}")]
    CommandError(String),
}

impl LedgerError {
    /// True for both the customer and the product flavour of "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::CustomerNotFound(_) | LedgerError::ProductNotFound(_)
        )
    }
}
