use std::sync::Arc;

use crate::ledger::DriverBalance;

/// Hook for pushing balance changes to another system. Invoked after every
/// ledger mutation with the driver's new balance.
pub trait BalanceObserver {
    fn balance_updated(&self, balance: &DriverBalance);
}

/// Ledger construction settings. The observer is opt-in and explicit; there
/// is no ambient global configuration.
#[derive(Default, Clone)]
pub struct LedgerParams {
    pub observer: Option<Arc<dyn BalanceObserver + Send + Sync>>,
}

impl LedgerParams {
    pub fn with_observer(observer: Arc<dyn BalanceObserver + Send + Sync>) -> Self {
        Self {
            observer: Some(observer),
        }
    }
}
