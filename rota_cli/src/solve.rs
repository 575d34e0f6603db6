use std::path::Path;

use anyhow::Context;
use comfy_table::Table;
use tracing::debug;

use rota_optimizer::{
    json::types::JsonAssignmentDay,
    solver::{assignment_model::AssignmentModel, outcome::SolveOutcome},
};

use crate::file_utils;

pub fn run(input: Option<&Path>, json: bool) -> Result<(), anyhow::Error> {
    let raw = file_utils::read_input(input).context("failed to read snapshot input")?;
    let day: JsonAssignmentDay =
        serde_json::from_str(&raw).context("snapshot is not valid JSON")?;
    let problem = day.build_problem()?;

    debug!(
        drivers = problem.drivers().len(),
        routes = problem.routes().len(),
        "solving day snapshot"
    );
    let outcome = AssignmentModel::new(&problem).solve();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match &outcome {
        SolveOutcome::Optimal(plan) => {
            let mut table = Table::new();
            table.set_header(vec!["Driver", "Route", "Hours", "Remaining"]);
            for status in &plan.driver_status {
                table.add_row(vec![
                    status.name.clone(),
                    status
                        .assigned_route
                        .clone()
                        .unwrap_or_else(|| "-".to_owned()),
                    format!("{:.1}", status.assigned_hours),
                    format!("{:.1}", status.remaining_hours),
                ]);
            }
            println!("{table}");

            let stats = &plan.statistics;
            println!(
                "{}/{} routes assigned, {:.1}h total, {}/{} drivers working",
                stats.routes_assigned,
                stats.total_routes,
                stats.total_hours_assigned,
                stats.drivers_working,
                stats.drivers_available
            );
        }
        SolveOutcome::Infeasible { reason } => println!("infeasible: {reason}"),
        SolveOutcome::Error { message } => println!("solver error: {message}"),
    }

    Ok(())
}
