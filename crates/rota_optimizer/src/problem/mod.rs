pub mod assignment_problem;
pub mod driver;
pub mod route;
