use std::fmt;

use schemars::JsonSchema;
use serde::Serialize;

use crate::problem::driver::DriverId;

use super::statistics::AssignmentStatistics;

/// The solver always hands back a tagged outcome. Infeasibility is a
/// first-class result, not an error; `Error` is reserved for backend
/// failures unrelated to feasibility.
#[derive(Serialize, JsonSchema, Debug, Clone)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolveOutcome {
    Optimal(AssignmentPlan),
    Infeasible { reason: InfeasibilityReason },
    Error { message: String },
}

impl SolveOutcome {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal(_))
    }

    pub fn plan(&self) -> Option<&AssignmentPlan> {
        match self {
            SolveOutcome::Optimal(plan) => Some(plan),
            _ => None,
        }
    }
}

/// One driver doing one route, as planned for the day. Hours are a snapshot
/// of the route's hours at solve time.
#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct PlannedAssignment {
    pub driver_id: DriverId,
    pub driver_name: String,
    pub route_name: String,
    pub route_hours: f64,
}

/// Post-assignment view of a driver: what they got (if anything) and what
/// the day leaves them with.
#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct DriverStatus {
    pub driver_id: DriverId,
    pub name: String,
    pub assigned_route: Option<String>,
    pub assigned_hours: f64,
    pub remaining_hours: f64,
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct AssignmentPlan {
    pub assignments: Vec<PlannedAssignment>,
    pub driver_status: Vec<DriverStatus>,
    /// Kept for the persisted result shape. Route coverage is a hard
    /// constraint, so an optimal plan never leaves a route here.
    pub unassigned_routes: Vec<String>,
    pub statistics: AssignmentStatistics,
    pub objective_value: f64,
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfeasibilityReason {
    /// More routes than drivers: coverage cannot hold with one route per
    /// driver per day.
    TooFewDrivers { drivers: usize, routes: usize },
    /// Total route hours exceed the fleet's total remaining capacity.
    CapacityShortfall {
        total_route_hours: f64,
        total_available_hours: f64,
    },
    /// A single route is longer than every driver's remaining hours.
    OversizedRoute {
        route: String,
        hours: f64,
        max_available_hours: f64,
    },
    /// The backend proved infeasibility for a combination the quick checks
    /// cannot name.
    NoFeasibleAssignment,
}

impl fmt::Display for InfeasibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfeasibilityReason::TooFewDrivers { drivers, routes } => write!(
                f,
                "{routes} routes but only {drivers} drivers; each driver takes at most one route per day"
            ),
            InfeasibilityReason::CapacityShortfall {
                total_route_hours,
                total_available_hours,
            } => write!(
                f,
                "total route hours ({total_route_hours}) exceed total driver capacity ({total_available_hours})"
            ),
            InfeasibilityReason::OversizedRoute {
                route,
                hours,
                max_available_hours,
            } => write!(
                f,
                "route {route:?} needs {hours} hours but the best-placed driver has only {max_available_hours} remaining"
            ),
            InfeasibilityReason::NoFeasibleAssignment => {
                write!(f, "no feasible assignment satisfies coverage and capacity")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = SolveOutcome::Infeasible {
            reason: InfeasibilityReason::TooFewDrivers {
                drivers: 1,
                routes: 2,
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "infeasible");
        assert_eq!(json["reason"]["kind"], "too_few_drivers");
    }

    #[test]
    fn test_error_outcome_keeps_message() {
        let outcome = SolveOutcome::Error {
            message: "backend exploded".to_owned(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "backend exploded");
    }
}
