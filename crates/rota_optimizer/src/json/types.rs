use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::{
    assignment_problem::{AssignmentProblem, ProblemError},
    driver::{DriverAvailability, DriverId},
    route::RouteDemand,
};

/// One day's snapshot as exchanged with the surrounding system: drivers
/// with remaining monthly hours and the routes to cover.
#[derive(Deserialize, JsonSchema, Debug)]
#[serde(deny_unknown_fields, rename = "AssignmentDay")]
pub struct JsonAssignmentDay {
    pub drivers: Vec<JsonDriver>,
    pub routes: Vec<JsonRoute>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
#[serde(deny_unknown_fields, rename = "Driver")]
pub struct JsonDriver {
    /// Stable code; derived from the name when the upstream system only
    /// tracks drivers by display name.
    pub id: Option<String>,
    pub name: String,
    pub available_hours: f64,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
#[serde(deny_unknown_fields, rename = "Route")]
pub struct JsonRoute {
    pub name: String,
    pub hours: f64,
}

impl JsonAssignmentDay {
    pub fn build_problem(self) -> Result<AssignmentProblem, ProblemError> {
        let drivers = self
            .drivers
            .into_iter()
            .map(|driver| {
                let id = driver
                    .id
                    .map(DriverId::new)
                    .unwrap_or_else(|| DriverId::derive_from_name(&driver.name));
                DriverAvailability::new(id, driver.name, driver.available_hours)
            })
            .collect();

        let routes = self
            .routes
            .into_iter()
            .map(|route| RouteDemand::new(route.name, route.hours))
            .collect();

        AssignmentProblem::new(drivers, routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_problem_from_json() {
        let day: JsonAssignmentDay = serde_json::from_str(
            r#"{
                "drivers": [
                    {"id": "D1", "name": "John Doe", "available_hours": 10.0},
                    {"name": "Jane Roe", "available_hours": 8.0}
                ],
                "routes": [
                    {"name": "12 - Downtown loop", "hours": 6.5}
                ]
            }"#,
        )
        .unwrap();

        let problem = day.build_problem().unwrap();
        assert_eq!(problem.drivers().len(), 2);
        assert_eq!(problem.drivers()[0].id().as_str(), "D1");
        assert_eq!(problem.drivers()[1].id().as_str(), "JANE_ROE");
        assert_eq!(problem.routes()[0].hours(), 6.5);
    }

    #[test]
    fn test_invalid_snapshot_is_a_problem_error() {
        let day: JsonAssignmentDay =
            serde_json::from_str(r#"{"drivers": [], "routes": []}"#).unwrap();
        assert!(matches!(day.build_problem(), Err(ProblemError::NoDrivers)));
    }
}
