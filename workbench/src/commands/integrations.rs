// workbench/src/commands/integrations.rs
//
// USE CASE: Check integration settings.

use comfy_table::{Cell, Color};
use std::path::PathBuf;
use std::process::ExitCode;

use workbench_core::application::check_integrations;

use crate::commands::{load_config, new_table};

pub fn check(project_dir: PathBuf) -> anyhow::Result<ExitCode> {
    let config = load_config(&project_dir)?;
    let checks = check_integrations(&config);

    if checks.is_empty() {
        println!("No integrations configured.");
        return Ok(ExitCode::SUCCESS);
    }

    let mut table = new_table(&["Integration", "Kind", "Result"]);
    for check in &checks {
        let result = match &check.error {
            None => Cell::new("ok").fg(Color::Green),
            Some(msg) => Cell::new(msg).fg(Color::Red),
        };
        table.add_row(vec![Cell::new(&check.name), Cell::new(&check.kind), result]);
    }
    println!("{table}");

    Ok(if checks.iter().all(|c| c.is_ok()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
