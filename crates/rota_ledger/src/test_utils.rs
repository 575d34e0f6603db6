use parking_lot::Mutex;

use rota_optimizer::problem::driver::DriverId;

use crate::{
    assignment::{AssignmentRecord, AssignmentStatus, month_span},
    store::AssignmentStore,
};

/// In-memory stand-in for the external persistence collaborator.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_persist: bool,
}

#[derive(Default)]
struct Inner {
    records: Vec<AssignmentRecord>,
    next_id: u64,
}

impl MemoryStore {
    /// A store whose bulk write always fails, for partial-apply tests.
    pub fn failing() -> Self {
        Self {
            inner: Mutex::default(),
            fail_persist: true,
        }
    }

    pub fn insert(&self, record: AssignmentRecord) -> u64 {
        self.store_record(record).id.unwrap()
    }

    pub fn delete(&self, id: u64) {
        self.inner.lock().records.retain(|r| r.id != Some(id));
    }

    pub fn record_count(&self) -> usize {
        self.inner.lock().records.len()
    }

    fn store_record(&self, mut record: AssignmentRecord) -> AssignmentRecord {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        record.id = Some(inner.next_id);
        inner.records.push(record.clone());
        record
    }
}

impl AssignmentStore for MemoryStore {
    async fn persist_bulk_assignments(
        &self,
        records: Vec<AssignmentRecord>,
    ) -> anyhow::Result<Vec<AssignmentRecord>> {
        if self.fail_persist {
            anyhow::bail!("assignment storage offline");
        }

        Ok(records
            .into_iter()
            .map(|record| self.store_record(record))
            .collect())
    }

    async fn assignments_for_driver_in_month(
        &self,
        driver: &DriverId,
        year: i16,
        month: i8,
    ) -> anyhow::Result<Vec<AssignmentRecord>> {
        let (first, last) = month_span(year, month)?;

        Ok(self
            .inner
            .lock()
            .records
            .iter()
            .filter(|r| {
                &r.driver_id == driver && r.assigned_date >= first && r.assigned_date <= last
            })
            .cloned()
            .collect())
    }
}

pub fn record(driver_id: &str, driver_name: &str, date: &str, hours: f64) -> AssignmentRecord {
    AssignmentRecord {
        id: None,
        assigned_date: date.parse().expect("test date should parse"),
        driver_id: DriverId::new(driver_id),
        driver_name: driver_name.to_owned(),
        route_number: "1".to_owned(),
        route_description: "Test route".to_owned(),
        hours_charged: hours,
        status: AssignmentStatus::Assigned,
    }
}
