use fxhash::FxHashSet;
use thiserror::Error;
use tracing::warn;

use super::{
    driver::{DriverAvailability, DriverId},
    route::RouteDemand,
};

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("at least one driver is required")]
    NoDrivers,
    #[error("at least one route is required")]
    NoRoutes,
    #[error("driver {name:?} has invalid available hours: {hours}")]
    InvalidDriverHours { name: String, hours: f64 },
    #[error("route {name:?} has invalid hours: {hours}")]
    InvalidRouteHours { name: String, hours: f64 },
    #[error("duplicate driver id: {0}")]
    DuplicateDriverId(DriverId),
    #[error("duplicate route name: {0:?}")]
    DuplicateRouteName(String),
}

/// A validated one-day assignment problem. Construction is the validation
/// boundary: a value of this type always has non-empty lists, finite
/// non-negative driver hours, finite positive route hours and unique keys.
#[derive(Debug, Clone)]
pub struct AssignmentProblem {
    drivers: Vec<DriverAvailability>,
    routes: Vec<RouteDemand>,
}

impl AssignmentProblem {
    pub fn new(
        drivers: Vec<DriverAvailability>,
        routes: Vec<RouteDemand>,
    ) -> Result<Self, ProblemError> {
        if drivers.is_empty() {
            return Err(ProblemError::NoDrivers);
        }
        if routes.is_empty() {
            return Err(ProblemError::NoRoutes);
        }

        let mut driver_ids = FxHashSet::default();
        let mut driver_names = FxHashSet::default();
        for driver in &drivers {
            if !driver.available_hours().is_finite() || driver.available_hours() < 0.0 {
                return Err(ProblemError::InvalidDriverHours {
                    name: driver.name().to_owned(),
                    hours: driver.available_hours(),
                });
            }
            if !driver_ids.insert(driver.id().clone()) {
                return Err(ProblemError::DuplicateDriverId(driver.id().clone()));
            }
            if !driver_names.insert(driver.name().to_owned()) {
                // Two slots for the same nominal person, each with its own
                // capacity. Legal, but worth a trace.
                warn!("duplicate driver name {:?} in problem input", driver.name());
            }
        }

        let mut route_names = FxHashSet::default();
        for route in &routes {
            if !route.hours().is_finite() || route.hours() <= 0.0 {
                return Err(ProblemError::InvalidRouteHours {
                    name: route.name().to_owned(),
                    hours: route.hours(),
                });
            }
            if !route_names.insert(route.name().to_owned()) {
                return Err(ProblemError::DuplicateRouteName(route.name().to_owned()));
            }
        }

        Ok(Self { drivers, routes })
    }

    pub fn drivers(&self) -> &[DriverAvailability] {
        &self.drivers
    }

    pub fn routes(&self) -> &[RouteDemand] {
        &self.routes
    }

    pub fn total_available_hours(&self) -> f64 {
        self.drivers.iter().map(|d| d.available_hours()).sum()
    }

    pub fn total_route_hours(&self) -> f64 {
        self.routes.iter().map(|r| r.hours()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_rejects_empty_drivers() {
        let routes = test_utils::routes(&[("R1", 4.0)]);
        assert!(matches!(
            AssignmentProblem::new(Vec::new(), routes),
            Err(ProblemError::NoDrivers)
        ));
    }

    #[test]
    fn test_rejects_empty_routes() {
        let drivers = test_utils::drivers(&[("D1", 8.0)]);
        assert!(matches!(
            AssignmentProblem::new(drivers, Vec::new()),
            Err(ProblemError::NoRoutes)
        ));
    }

    #[test]
    fn test_rejects_negative_driver_hours() {
        let drivers = test_utils::drivers(&[("D1", -1.0)]);
        let routes = test_utils::routes(&[("R1", 4.0)]);
        assert!(matches!(
            AssignmentProblem::new(drivers, routes),
            Err(ProblemError::InvalidDriverHours { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_hour_route() {
        let drivers = test_utils::drivers(&[("D1", 8.0)]);
        let routes = test_utils::routes(&[("R1", 0.0)]);
        assert!(matches!(
            AssignmentProblem::new(drivers, routes),
            Err(ProblemError::InvalidRouteHours { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_route_name() {
        let drivers = test_utils::drivers(&[("D1", 8.0), ("D2", 8.0)]);
        let routes = test_utils::routes(&[("R1", 4.0), ("R1", 5.0)]);
        assert!(matches!(
            AssignmentProblem::new(drivers, routes),
            Err(ProblemError::DuplicateRouteName(_))
        ));
    }

    #[test]
    fn test_allows_duplicate_driver_names_with_distinct_ids() {
        let drivers = vec![
            test_utils::driver_with_id("D1_A", "John Doe", 8.0),
            test_utils::driver_with_id("D1_B", "John Doe", 6.0),
        ];
        let routes = test_utils::routes(&[("R1", 4.0)]);
        assert!(AssignmentProblem::new(drivers, routes).is_ok());
    }

    #[test]
    fn test_totals() {
        let problem = test_utils::problem(&[("D1", 10.0), ("D2", 8.0)], &[("R1", 5.0)]);
        assert_eq!(problem.total_available_hours(), 18.0);
        assert_eq!(problem.total_route_hours(), 5.0);
    }
}
