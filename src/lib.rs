pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::cart::OrderRequest;
pub use application::catalog::Deletion;
pub use application::config::EngineConfig;
pub use application::engine::CommerceEngine;
pub use application::payment::{PaymentPolicy, PaymentSummary};
pub use error::{LedgerError, Result};
