use schemars::JsonSchema;
use serde::Serialize;

/// Aggregate figures for one solved day, shaped for the reporting layer.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct AssignmentStatistics {
    pub total_routes: usize,
    pub routes_assigned: usize,
    pub routes_unassigned: usize,
    pub total_hours_assigned: f64,
    pub drivers_working: usize,
    pub drivers_available: usize,
}
