use jiff::civil::Date;
use thiserror::Error;
use tracing::info;

use rota_optimizer::solver::outcome::SolveOutcome;

use crate::{
    assignment::AssignmentRecord,
    ledger::{HourBalanceLedger, LedgerError},
    store::AssignmentStore,
};

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("cannot apply a non-optimal outcome ({status}): {detail}")]
    NotOptimal {
        status: &'static str,
        detail: String,
    },
    #[error("failed to persist assignment batch: {0}")]
    Persist(#[source] anyhow::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReceipt {
    pub assignments_created: usize,
}

/// Turns an optimal plan into persisted assignment records and ledger
/// updates, in that order: the whole batch is persisted in one collaborator
/// call before any balance is touched, so a failed write leaves the ledger
/// exactly as it was.
pub struct SolutionApplier<'a, S> {
    ledger: &'a mut HourBalanceLedger<S>,
}

impl<'a, S: AssignmentStore> SolutionApplier<'a, S> {
    pub fn new(ledger: &'a mut HourBalanceLedger<S>) -> Self {
        Self { ledger }
    }

    pub async fn apply(
        &mut self,
        outcome: &SolveOutcome,
        assigned_date: Date,
    ) -> Result<ApplyReceipt, ApplyError> {
        let plan = match outcome {
            SolveOutcome::Optimal(plan) => plan,
            SolveOutcome::Infeasible { reason } => {
                return Err(ApplyError::NotOptimal {
                    status: "infeasible",
                    detail: reason.to_string(),
                });
            }
            SolveOutcome::Error { message } => {
                return Err(ApplyError::NotOptimal {
                    status: "error",
                    detail: message.clone(),
                });
            }
        };

        let records: Vec<AssignmentRecord> = plan
            .assignments
            .iter()
            .map(|planned| AssignmentRecord::from_planned(planned, assigned_date))
            .collect();

        let persisted = self
            .ledger
            .store()
            .persist_bulk_assignments(records)
            .await
            .map_err(ApplyError::Persist)?;

        // One affected driver at a time, so two bulk applies touching the
        // same driver cannot interleave their ledger updates.
        let mut affected: Vec<&str> = Vec::new();
        for planned in &plan.assignments {
            if !affected.contains(&planned.driver_name.as_str()) {
                affected.push(&planned.driver_name);
            }
        }
        for name in affected {
            self.ledger
                .recompute_from_assignments(name, assigned_date.year(), assigned_date.month())
                .await?;
        }

        info!(
            assignments_created = persisted.len(),
            %assigned_date,
            "applied assignment plan"
        );
        Ok(ApplyReceipt {
            assignments_created: persisted.len(),
        })
    }
}
