//! Application layer containing the core business logic orchestration.
//!
//! The services here (`ProductCatalog`, `CustomerDirectory`, `CartManager`,
//! `PaymentAggregator`) share one pair of repositories and are bundled behind
//! [`engine::CommerceEngine`]. Product and customer cells are locked
//! individually, always product first.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod engine;
pub mod locking;
pub mod payment;
