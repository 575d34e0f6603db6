use good_lp::{
    Expression, ResolutionError, Solution, SolverModel, Variable, constraint, default_solver,
    variable, variables,
};
use tracing::debug;

use crate::problem::assignment_problem::AssignmentProblem;

use super::{
    feasibility,
    outcome::{AssignmentPlan, DriverStatus, InfeasibilityReason, PlannedAssignment, SolveOutcome},
    statistics::AssignmentStatistics,
};

/// One-day driver/route matching as a mixed-integer model.
///
/// Decision variable per (driver, route) pair; every route covered by
/// exactly one driver, at most one route per driver, assigned hours within
/// each driver's remaining capacity. The objective maximizes the sum of
/// assigned drivers' capacity weights, which biases ties toward drivers
/// with more of their monthly allotment left.
pub struct AssignmentModel<'a> {
    problem: &'a AssignmentProblem,
}

impl<'a> AssignmentModel<'a> {
    pub fn new(problem: &'a AssignmentProblem) -> Self {
        Self { problem }
    }

    pub fn solve(&self) -> SolveOutcome {
        if let Some(reason) = feasibility::check(self.problem) {
            debug!(%reason, "assignment problem rejected before the backend ran");
            return SolveOutcome::Infeasible { reason };
        }

        let drivers = self.problem.drivers();
        let routes = self.problem.routes();
        debug!(
            drivers = drivers.len(),
            routes = routes.len(),
            "building assignment model"
        );

        let weights = capacity_weights(self.problem);

        let mut vars = variables!();
        let indicators: Vec<Vec<Variable>> = drivers
            .iter()
            .map(|_| routes.iter().map(|_| vars.add(variable().binary())).collect())
            .collect();

        let objective = indicators
            .iter()
            .zip(&weights)
            .flat_map(|(row, &weight)| row.iter().map(move |&var| var * weight))
            .fold(Expression::from(0.0), |acc, term| acc + term);

        let mut model = vars.maximise(objective).using(default_solver);

        // Route coverage: exactly one driver per route.
        for (j, _) in routes.iter().enumerate() {
            let covered = indicators
                .iter()
                .fold(Expression::from(0.0), |acc, row| acc + row[j]);
            model = model.with(constraint!(covered == 1.0));
        }

        for (i, driver) in drivers.iter().enumerate() {
            // At most one route per driver per day.
            let assigned = indicators[i]
                .iter()
                .fold(Expression::from(0.0), |acc, &var| acc + var);
            model = model.with(constraint!(assigned <= 1.0));

            // Assigned hours within the driver's remaining capacity.
            let load = indicators[i]
                .iter()
                .zip(routes)
                .fold(Expression::from(0.0), |acc, (&var, route)| {
                    acc + var * route.hours()
                });
            model = model.with(constraint!(load <= driver.available_hours()));
        }

        match model.solve() {
            Ok(solution) => self.build_plan(&indicators, &weights, &solution),
            Err(ResolutionError::Infeasible) => SolveOutcome::Infeasible {
                reason: InfeasibilityReason::NoFeasibleAssignment,
            },
            Err(error) => SolveOutcome::Error {
                message: error.to_string(),
            },
        }
    }

    fn build_plan(
        &self,
        indicators: &[Vec<Variable>],
        weights: &[f64],
        solution: &impl Solution,
    ) -> SolveOutcome {
        let drivers = self.problem.drivers();
        let routes = self.problem.routes();

        let mut assignments = Vec::new();
        let mut driver_status = Vec::new();
        let mut objective_value = 0.0;
        let mut assigned_route_indices = vec![false; routes.len()];

        for (i, driver) in drivers.iter().enumerate() {
            let chosen = indicators[i]
                .iter()
                .position(|&var| solution.value(var) > 0.5);

            match chosen {
                Some(j) => {
                    let route = &routes[j];
                    assigned_route_indices[j] = true;
                    objective_value += weights[i];
                    assignments.push(PlannedAssignment {
                        driver_id: driver.id().clone(),
                        driver_name: driver.name().to_owned(),
                        route_name: route.name().to_owned(),
                        route_hours: route.hours(),
                    });
                    driver_status.push(DriverStatus {
                        driver_id: driver.id().clone(),
                        name: driver.name().to_owned(),
                        assigned_route: Some(route.name().to_owned()),
                        assigned_hours: route.hours(),
                        remaining_hours: driver.available_hours() - route.hours(),
                    });
                }
                None => driver_status.push(DriverStatus {
                    driver_id: driver.id().clone(),
                    name: driver.name().to_owned(),
                    assigned_route: None,
                    assigned_hours: 0.0,
                    remaining_hours: driver.available_hours(),
                }),
            }
        }

        let unassigned_routes: Vec<String> = routes
            .iter()
            .zip(&assigned_route_indices)
            .filter(|&(_, &assigned)| !assigned)
            .map(|(route, _)| route.name().to_owned())
            .collect();

        let total_hours_assigned: f64 = assignments.iter().map(|a| a.route_hours).sum();
        let statistics = AssignmentStatistics {
            total_routes: routes.len(),
            routes_assigned: assignments.len(),
            routes_unassigned: unassigned_routes.len(),
            total_hours_assigned,
            drivers_working: assignments.len(),
            drivers_available: drivers.len(),
        };

        debug!(
            routes_assigned = statistics.routes_assigned,
            objective_value, "assignment model solved"
        );

        SolveOutcome::Optimal(AssignmentPlan {
            assignments,
            driver_status,
            unassigned_routes,
            statistics,
            objective_value,
        })
    }
}

/// Each driver's share of the fleet's remaining hours. A zero-capacity fleet
/// degenerates to plain coverage maximization with unit weights.
fn capacity_weights(problem: &AssignmentProblem) -> Vec<f64> {
    let total = problem.total_available_hours();
    if total <= 0.0 {
        return vec![1.0; problem.drivers().len()];
    }

    problem
        .drivers()
        .iter()
        .map(|d| d.available_hours() / total)
        .collect()
}

#[cfg(test)]
mod tests {
    use fxhash::FxHashSet;

    use super::*;
    use crate::test_utils;

    fn solve(drivers: &[(&str, f64)], routes: &[(&str, f64)]) -> SolveOutcome {
        let problem = test_utils::problem(drivers, routes);
        AssignmentModel::new(&problem).solve()
    }

    #[test]
    fn test_full_coverage_on_feasible_input() {
        let outcome = solve(
            &[("D1", 10.0), ("D2", 8.0), ("D3", 6.0)],
            &[("R1", 8.0), ("R2", 6.0), ("R3", 4.0)],
        );

        let plan = outcome.plan().expect("expected an optimal outcome");
        assert_eq!(plan.assignments.len(), 3);
        assert!(plan.unassigned_routes.is_empty());
        assert_eq!(plan.statistics.routes_assigned, 3);
        assert_eq!(plan.statistics.routes_unassigned, 0);
        assert_eq!(plan.statistics.total_hours_assigned, 18.0);

        // Every route covered exactly once.
        let covered: FxHashSet<&str> = plan
            .assignments
            .iter()
            .map(|a| a.route_name.as_str())
            .collect();
        assert_eq!(covered.len(), 3);

        // All three drivers work, so the objective is the full weight mass.
        assert!((plan.objective_value - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_capacity_respected() {
        let outcome = solve(
            &[("D1", 10.0), ("D2", 8.0), ("D3", 6.0)],
            &[("R1", 8.0), ("R2", 6.0), ("R3", 4.0)],
        );

        let plan = outcome.plan().expect("expected an optimal outcome");
        for assignment in &plan.assignments {
            let available = match assignment.driver_id.as_str() {
                "D1" => 10.0,
                "D2" => 8.0,
                "D3" => 6.0,
                other => panic!("unexpected driver {other}"),
            };
            assert!(assignment.route_hours <= available);
        }
    }

    #[test]
    fn test_single_route_per_driver() {
        let outcome = solve(
            &[("D1", 20.0), ("D2", 20.0), ("D3", 20.0)],
            &[("R1", 2.0), ("R2", 2.0), ("R3", 2.0)],
        );

        let plan = outcome.plan().expect("expected an optimal outcome");
        let mut seen = FxHashSet::default();
        for assignment in &plan.assignments {
            assert!(
                seen.insert(assignment.driver_id.clone()),
                "driver {} assigned twice",
                assignment.driver_id
            );
        }
    }

    #[test]
    fn test_infeasible_on_capacity_overload() {
        let outcome = solve(&[("D1", 4.0), ("D2", 4.0)], &[("R1", 5.0), ("R2", 5.0)]);
        assert!(matches!(
            outcome,
            SolveOutcome::Infeasible {
                reason: InfeasibilityReason::CapacityShortfall { .. }
            }
        ));
    }

    #[test]
    fn test_infeasible_on_route_count_overflow() {
        let outcome = solve(&[("D1", 5.0)], &[("R1", 3.0), ("R2", 3.0)]);
        assert!(matches!(
            outcome,
            SolveOutcome::Infeasible {
                reason: InfeasibilityReason::TooFewDrivers { .. }
            }
        ));
    }

    #[test]
    fn test_infeasible_on_combinatorial_mismatch() {
        // Passes every quick check (2 routes, 2 drivers, total 8 <= 13,
        // max route 4 <= 10) but only D1 can take either route.
        let outcome = solve(&[("D1", 10.0), ("D2", 3.0)], &[("R1", 4.0), ("R2", 4.0)]);
        assert!(matches!(
            outcome,
            SolveOutcome::Infeasible {
                reason: InfeasibilityReason::NoFeasibleAssignment
            }
        ));
    }

    #[test]
    fn test_objective_prefers_driver_with_more_hours() {
        // One route, three drivers: the weighted objective is maximized by
        // the 10-hour driver alone, so the objective value is its weight.
        let outcome = solve(&[("D1", 10.0), ("D2", 8.0), ("D3", 6.0)], &[("R1", 4.0)]);

        let plan = outcome.plan().expect("expected an optimal outcome");
        assert_eq!(plan.assignments.len(), 1);
        assert!((plan.objective_value - 10.0 / 24.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_capacity_fleet_uses_unit_weights() {
        let problem = test_utils::problem(&[("D1", 0.0), ("D2", 0.0)], &[("R1", 1.0)]);
        assert_eq!(capacity_weights(&problem), vec![1.0, 1.0]);
    }

    #[test]
    fn test_deterministic_objective_value() {
        let problem = test_utils::problem(
            &[("D1", 9.0), ("D2", 9.0), ("D3", 9.0)],
            &[("R1", 5.0), ("R2", 5.0)],
        );

        let first = AssignmentModel::new(&problem).solve();
        let second = AssignmentModel::new(&problem).solve();

        let first = first.plan().expect("expected an optimal outcome");
        let second = second.plan().expect("expected an optimal outcome");
        assert!((first.objective_value - second.objective_value).abs() < 1e-9);
    }

    #[test]
    fn test_unassigned_driver_status_keeps_available_hours() {
        let outcome = solve(&[("D1", 10.0), ("D2", 2.0)], &[("R1", 4.0)]);

        let plan = outcome.plan().expect("expected an optimal outcome");
        // Weights differ, so the optimum is unique: D1 works, D2 idles.
        let idle = plan
            .driver_status
            .iter()
            .find(|s| s.assigned_route.is_none())
            .expect("one driver stays idle");
        assert_eq!(idle.driver_id.as_str(), "D2");
        assert_eq!(idle.assigned_hours, 0.0);
        assert_eq!(idle.remaining_hours, 2.0);
    }
}
