//! Domain layer: catalog records, customer profiles and their order ledgers,
//! plus the repository ports the application layer is written against.

pub mod customer;
pub mod ledger;
pub mod ports;
pub mod product;
