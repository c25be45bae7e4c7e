use super::locking::LockPolicy;
use crate::domain::customer::{Customer, CustomerKey};
use crate::domain::ports::{CustomerRepositoryRef, CustomerSlot};
use crate::error::{LedgerError, Result};

/// Customer profiles keyed by [`CustomerKey`].
#[derive(Clone)]
pub struct CustomerDirectory {
    customers: CustomerRepositoryRef,
    locks: LockPolicy,
}

impl CustomerDirectory {
    pub fn new(customers: CustomerRepositoryRef, locks: LockPolicy) -> Self {
        Self { customers, locks }
    }

    /// Registers a customer with an empty cart and an empty ledger.
    ///
    /// Registering an existing key resets that profile (new display name, cart
    /// and ledger cleared) and returns `true`.
    pub async fn register(&self, key: CustomerKey, display_name: &str) -> Result<bool> {
        let (slot, inserted) = self
            .customers
            .insert_if_absent(Customer::new(key.clone(), display_name))
            .await;
        if inserted {
            return Ok(false);
        }

        let mut customer = self.locks.write(&slot).await?;
        *customer = Customer::new(key, display_name);
        Ok(true)
    }

    /// Returns a snapshot of the customer's profile.
    pub async fn resolve(&self, key: &CustomerKey) -> Result<Customer> {
        let slot = self.slot(key).await?;
        let customer = self.locks.read(&slot).await?;
        Ok((*customer).clone())
    }

    pub async fn exists(&self, key: &CustomerKey) -> bool {
        self.customers.slot(key).await.is_some()
    }

    pub async fn keys(&self) -> Vec<CustomerKey> {
        self.customers.keys().await
    }

    pub(crate) async fn slot(&self, key: &CustomerKey) -> Result<CustomerSlot> {
        self.customers
            .slot(key)
            .await
            .ok_or_else(|| LedgerError::CustomerNotFound(key.clone()))
    }

    pub(crate) fn locks(&self) -> LockPolicy {
        self.locks
    }
}
