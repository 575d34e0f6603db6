use anyhow::Context;

use rota_optimizer::problem::{
    assignment_problem::AssignmentProblem,
    driver::{DriverAvailability, DriverId},
    route::RouteDemand,
};

use crate::assignment::AssignmentRecord;

/// Supplies the day's solver input. The driver side sources its
/// `available_hours` from the ledger; the core only consumes the shape.
#[allow(async_fn_in_trait)]
pub trait SnapshotProvider {
    async fn driver_snapshot(
        &self,
        year: i16,
        month: i8,
    ) -> anyhow::Result<Vec<DriverAvailability>>;

    async fn route_snapshot(&self) -> anyhow::Result<Vec<RouteDemand>>;
}

/// The external persistence collaborator. Writes are batched; month reads
/// feed ledger recomputation.
#[allow(async_fn_in_trait)]
pub trait AssignmentStore {
    async fn persist_bulk_assignments(
        &self,
        records: Vec<AssignmentRecord>,
    ) -> anyhow::Result<Vec<AssignmentRecord>>;

    async fn assignments_for_driver_in_month(
        &self,
        driver: &DriverId,
        year: i16,
        month: i8,
    ) -> anyhow::Result<Vec<AssignmentRecord>>;
}

/// Fetch both snapshots and assemble the validated day problem.
pub async fn load_day_problem<P: SnapshotProvider>(
    provider: &P,
    year: i16,
    month: i8,
) -> anyhow::Result<AssignmentProblem> {
    let drivers = provider
        .driver_snapshot(year, month)
        .await
        .context("driver snapshot failed")?;
    let routes = provider
        .route_snapshot()
        .await
        .context("route snapshot failed")?;

    AssignmentProblem::new(drivers, routes).context("snapshot does not form a valid day problem")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSnapshots {
        drivers: Vec<(&'static str, f64)>,
        routes: Vec<(&'static str, f64)>,
    }

    impl SnapshotProvider for FixedSnapshots {
        async fn driver_snapshot(
            &self,
            _year: i16,
            _month: i8,
        ) -> anyhow::Result<Vec<DriverAvailability>> {
            Ok(self
                .drivers
                .iter()
                .map(|&(name, hours)| {
                    DriverAvailability::new(DriverId::derive_from_name(name), name, hours)
                })
                .collect())
        }

        async fn route_snapshot(&self) -> anyhow::Result<Vec<RouteDemand>> {
            Ok(self
                .routes
                .iter()
                .map(|&(name, hours)| RouteDemand::new(name, hours))
                .collect())
        }
    }

    #[tokio::test]
    async fn test_load_day_problem_from_snapshots() {
        let provider = FixedSnapshots {
            drivers: vec![("D1", 10.0), ("D2", 8.0)],
            routes: vec![("R1", 5.0)],
        };

        let problem = load_day_problem(&provider, 2026, 8).await.unwrap();
        assert_eq!(problem.drivers().len(), 2);
        assert_eq!(problem.routes().len(), 1);
    }

    #[tokio::test]
    async fn test_load_day_problem_rejects_empty_snapshot() {
        let provider = FixedSnapshots {
            drivers: Vec::new(),
            routes: vec![("R1", 5.0)],
        };

        let error = load_day_problem(&provider, 2026, 8).await.unwrap_err();
        assert!(error.to_string().contains("valid day problem"));
    }
}
