use crate::error::{LedgerError, Result};
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// How long a caller is willing to wait for a product or customer lock.
///
/// Every operation takes all of its locks before writing anything, so a
/// timeout can only fire while nothing has been mutated yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockPolicy {
    timeout: Option<Duration>,
}

impl LockPolicy {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub async fn read<'a, T>(&self, lock: &'a RwLock<T>) -> Result<RwLockReadGuard<'a, T>> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, lock.read())
                .await
                .map_err(|_| LedgerError::LockTimeout),
            None => Ok(lock.read().await),
        }
    }

    pub async fn write<'a, T>(&self, lock: &'a RwLock<T>) -> Result<RwLockWriteGuard<'a, T>> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, lock.write())
                .await
                .map_err(|_| LedgerError::LockTimeout),
            None => Ok(lock.write().await),
        }
    }
}
