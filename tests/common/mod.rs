#![allow(dead_code)]

use rust_decimal_macros::dec;
use std::io::Write;
use stockledger::CommerceEngine;
use stockledger::EngineConfig;
use stockledger::domain::customer::CustomerKey;
use stockledger::domain::product::{Price, Product, ProductId};
use tempfile::NamedTempFile;

pub const BOOK: ProductId = ProductId(1);
pub const SCRIPT_HEADER: &str = "op, customer, product, name, quantity, price, description";

pub fn alice() -> CustomerKey {
    CustomerKey::new("alice")
}

pub fn book(quantity: u32) -> Product {
    Product::new(BOOK, "Book", quantity, Price::new(dec!(9.99)).unwrap(), "d")
}

/// An engine holding product 1 ("Book", 10 @ 9.99) and customer "alice".
pub async fn seeded_engine(config: EngineConfig) -> CommerceEngine {
    let engine = CommerceEngine::in_memory(config);
    engine.create_or_replace_product(book(10), None).await.unwrap();
    engine.register_customer(alice(), "Alice").await.unwrap();
    engine
}

/// Writes a command script with the standard header followed by `rows`.
pub fn write_script(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{SCRIPT_HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}
