use super::payment::PaymentPolicy;
use std::time::Duration;

/// Engine-wide settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Policy used by `total_owed` and `payment_summary`.
    pub payment_policy: PaymentPolicy,
    /// Upper bound on waiting for any single lock. `None` waits indefinitely.
    pub lock_timeout: Option<Duration>,
}

impl EngineConfig {
    pub fn with_payment_policy(mut self, policy: PaymentPolicy) -> Self {
        self.payment_policy = policy;
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }
}
