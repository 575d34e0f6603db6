use fxhash::FxHashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use rota_optimizer::problem::driver::DriverId;

use crate::{store::AssignmentStore, sync::LedgerParams};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("driver {0:?} not found")]
    DriverNotFound(String),
    #[error("assignment store failed: {0}")]
    Store(#[from] anyhow::Error),
}

/// Informational depletion tag. The solver never reads it.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Active,
    Low,
    Critical,
}

/// The authoritative per-driver monthly hour balance. `remaining` is the
/// single mutable quantity and always stays within `[0, total]`.
#[derive(Serialize, Debug, Clone)]
pub struct DriverBalance {
    id: DriverId,
    name: String,
    monthly_hours_total: f64,
    monthly_hours_remaining: f64,
}

impl DriverBalance {
    pub fn id(&self) -> &DriverId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn monthly_hours_total(&self) -> f64 {
        self.monthly_hours_total
    }

    pub fn monthly_hours_remaining(&self) -> f64 {
        self.monthly_hours_remaining
    }

    pub fn status(&self) -> BalanceStatus {
        if self.monthly_hours_total <= 0.0 {
            return BalanceStatus::Critical;
        }
        let ratio = self.monthly_hours_remaining / self.monthly_hours_total;
        if ratio >= 0.25 {
            BalanceStatus::Active
        } else if ratio >= 0.10 {
            BalanceStatus::Low
        } else {
            BalanceStatus::Critical
        }
    }
}

/// Month summary returned by the read path.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HourBalance {
    pub total: f64,
    pub used: f64,
    pub remaining: f64,
}

/// Tracks every driver's remaining monthly hours and keeps them consistent
/// as assignments are created, edited, deleted or bulk-applied.
///
/// Balances are keyed by stable driver id; the name index exists because
/// assignments address drivers by free-text name. Write paths upsert
/// unknown names with a derived code, read paths report "not found".
pub struct HourBalanceLedger<S> {
    store: S,
    balances: FxHashMap<DriverId, DriverBalance>,
    by_name: FxHashMap<String, DriverId>,
    params: LedgerParams,
}

impl<S: AssignmentStore> HourBalanceLedger<S> {
    pub fn new(store: S, params: LedgerParams) -> Self {
        Self {
            store,
            balances: FxHashMap::default(),
            by_name: FxHashMap::default(),
            params,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn balance(&self, name: &str) -> Option<&DriverBalance> {
        self.by_name.get(name).and_then(|id| self.balances.get(id))
    }

    /// Update a driver's monthly allotment, creating the driver when it is
    /// unknown. On an existing driver the remaining hours shift by the
    /// allotment delta, so a recompute from assignments yields the same
    /// value afterwards.
    pub fn set_monthly_total(&mut self, name: &str, total: f64) -> &DriverBalance {
        let id = match self.by_name.get(name) {
            Some(id) => id.clone(),
            None => {
                let id = DriverId::derive_from_name(name);
                debug!(%id, name, "creating ledger entry for new driver");
                self.by_name.insert(name.to_owned(), id.clone());
                self.balances.insert(
                    id.clone(),
                    DriverBalance {
                        id: id.clone(),
                        name: name.to_owned(),
                        monthly_hours_total: 0.0,
                        monthly_hours_remaining: 0.0,
                    },
                );
                id
            }
        };

        let balance = self
            .balances
            .get_mut(&id)
            .expect("name index points at a missing balance");
        let delta = total - balance.monthly_hours_total;
        balance.monthly_hours_total = total;
        balance.monthly_hours_remaining =
            clamp_remaining(balance.monthly_hours_remaining + delta, total);

        let balance = &self.balances[&id];
        self.notify(balance);
        balance
    }

    /// Incremental update: `-hours` on assignment creation, `+hours` on
    /// deletion, without a full month recomputation. Unknown drivers are
    /// created with a zero allotment.
    pub fn apply_assignment_delta(&mut self, name: &str, hours_delta: f64) -> &DriverBalance {
        let id = self.ensure_driver(name);

        let balance = self
            .balances
            .get_mut(&id)
            .expect("name index points at a missing balance");
        balance.monthly_hours_remaining = clamp_remaining(
            balance.monthly_hours_remaining - hours_delta,
            balance.monthly_hours_total,
        );

        let balance = &self.balances[&id];
        self.notify(balance);
        balance
    }

    /// Read path: the month's balance computed from the persisted
    /// assignments. `used` counts every stored assignment with recorded
    /// hours in the month, whatever its status; deleted records are gone
    /// from the store and stop counting.
    pub async fn remaining_hours(
        &self,
        name: &str,
        year: i16,
        month: i8,
    ) -> Result<HourBalance, LedgerError> {
        let id = self
            .by_name
            .get(name)
            .ok_or_else(|| LedgerError::DriverNotFound(name.to_owned()))?;
        let total = self.balances[id].monthly_hours_total;

        let used = self.month_hours_used(id, year, month).await?;
        Ok(HourBalance {
            total,
            used,
            remaining: clamp_remaining(total - used, total),
        })
    }

    /// Full recompute from the store, used after bulk operations and
    /// whenever drift is suspected. Must agree with the accumulated
    /// incremental deltas.
    pub async fn recompute_from_assignments(
        &mut self,
        name: &str,
        year: i16,
        month: i8,
    ) -> Result<HourBalance, LedgerError> {
        let id = self.ensure_driver(name);
        let used = self.month_hours_used(&id, year, month).await?;

        let balance = self
            .balances
            .get_mut(&id)
            .expect("name index points at a missing balance");
        let total = balance.monthly_hours_total;
        balance.monthly_hours_remaining = clamp_remaining(total - used, total);

        let balance = &self.balances[&id];
        self.notify(balance);
        Ok(HourBalance {
            total,
            used,
            remaining: balance.monthly_hours_remaining,
        })
    }

    async fn month_hours_used(
        &self,
        id: &DriverId,
        year: i16,
        month: i8,
    ) -> Result<f64, LedgerError> {
        let records = self
            .store
            .assignments_for_driver_in_month(id, year, month)
            .await?;
        Ok(records.iter().map(|r| r.hours_charged).sum())
    }

    fn ensure_driver(&mut self, name: &str) -> DriverId {
        if let Some(id) = self.by_name.get(name) {
            return id.clone();
        }

        let id = DriverId::derive_from_name(name);
        warn!(%id, name, "write for unknown driver, creating ledger entry");
        self.by_name.insert(name.to_owned(), id.clone());
        self.balances.insert(
            id.clone(),
            DriverBalance {
                id: id.clone(),
                name: name.to_owned(),
                monthly_hours_total: 0.0,
                monthly_hours_remaining: 0.0,
            },
        );
        id
    }

    fn notify(&self, balance: &DriverBalance) {
        if let Some(observer) = &self.params.observer {
            observer.balance_updated(balance);
        }
    }
}

fn clamp_remaining(remaining: f64, total: f64) -> f64 {
    remaining.clamp(0.0, total.max(0.0))
}
