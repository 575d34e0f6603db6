use crate::problem::{
    assignment_problem::AssignmentProblem,
    driver::{DriverAvailability, DriverId},
    route::RouteDemand,
};

pub fn driver_with_id(id: &str, name: &str, available_hours: f64) -> DriverAvailability {
    DriverAvailability::new(DriverId::new(id), name, available_hours)
}

pub fn drivers(specs: &[(&str, f64)]) -> Vec<DriverAvailability> {
    specs
        .iter()
        .map(|&(name, hours)| driver_with_id(name, name, hours))
        .collect()
}

pub fn routes(specs: &[(&str, f64)]) -> Vec<RouteDemand> {
    specs
        .iter()
        .map(|&(name, hours)| RouteDemand::new(name, hours))
        .collect()
}

pub fn problem(driver_specs: &[(&str, f64)], route_specs: &[(&str, f64)]) -> AssignmentProblem {
    AssignmentProblem::new(drivers(driver_specs), routes(route_specs))
        .expect("test problem should validate")
}
