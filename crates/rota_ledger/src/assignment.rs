use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use rota_optimizer::problem::{driver::DriverId, route::RouteIdentifier};
use rota_optimizer::solver::outcome::PlannedAssignment;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    Assigned,
    Confirmed,
}

/// The persisted fact: one driver does one route on one day. Route number
/// and description are denormalized from the route's display name, and
/// `hours_charged` snapshots the route's hours at assignment time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AssignmentRecord {
    /// Assigned by the store on persistence.
    pub id: Option<u64>,
    pub assigned_date: Date,
    pub driver_id: DriverId,
    pub driver_name: String,
    pub route_number: String,
    pub route_description: String,
    pub hours_charged: f64,
    pub status: AssignmentStatus,
}

impl AssignmentRecord {
    pub fn from_planned(planned: &PlannedAssignment, assigned_date: Date) -> Self {
        let identifier = RouteIdentifier::from_display_name(&planned.route_name);

        Self {
            id: None,
            assigned_date,
            driver_id: planned.driver_id.clone(),
            driver_name: planned.driver_name.clone(),
            route_number: identifier.number.to_owned(),
            route_description: identifier.description.to_owned(),
            hours_charged: planned.route_hours,
            status: AssignmentStatus::Assigned,
        }
    }
}

/// First and last day of a civil month.
pub fn month_span(year: i16, month: i8) -> Result<(Date, Date), jiff::Error> {
    let first = Date::new(year, month, 1)?;
    Ok((first, first.last_of_month()))
}
