use std::path::Path;

use anyhow::Context;
use serde_json::json;

use rota_optimizer::json::types::JsonAssignmentDay;

use crate::file_utils;

pub fn run(input: Option<&Path>) -> Result<(), anyhow::Error> {
    let raw = file_utils::read_input(input).context("failed to read snapshot input")?;
    let day: JsonAssignmentDay =
        serde_json::from_str(&raw).context("snapshot is not valid JSON")?;

    let report = match day.build_problem() {
        Ok(_) => json!({ "valid": true, "message": "input is valid" }),
        Err(error) => json!({ "valid": false, "message": error.to_string() }),
    };
    println!("{report}");

    Ok(())
}
