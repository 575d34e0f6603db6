use crate::problem::assignment_problem::AssignmentProblem;

use super::outcome::InfeasibilityReason;

const HOURS_EPSILON: f64 = 1e-9;

/// Cheap necessary conditions, checked before the backend runs so that an
/// infeasible day gets a specific diagnostic instead of a bare "infeasible"
/// from the solver. Passing these checks does not guarantee feasibility.
pub fn check(problem: &AssignmentProblem) -> Option<InfeasibilityReason> {
    let drivers = problem.drivers();
    let routes = problem.routes();

    if routes.len() > drivers.len() {
        return Some(InfeasibilityReason::TooFewDrivers {
            drivers: drivers.len(),
            routes: routes.len(),
        });
    }

    let total_available_hours = problem.total_available_hours();
    let total_route_hours = problem.total_route_hours();
    if total_route_hours > total_available_hours + HOURS_EPSILON {
        return Some(InfeasibilityReason::CapacityShortfall {
            total_route_hours,
            total_available_hours,
        });
    }

    let max_available_hours = drivers
        .iter()
        .map(|d| d.available_hours())
        .fold(0.0_f64, f64::max);
    for route in routes {
        if route.hours() > max_available_hours + HOURS_EPSILON {
            return Some(InfeasibilityReason::OversizedRoute {
                route: route.name().to_owned(),
                hours: route.hours(),
                max_available_hours,
            });
        }
    }

    None
}
