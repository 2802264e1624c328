// workbench/src/commands/validate.rs
//
// USE CASE: Validate a dataset and list the non-compliant rows.

use comfy_table::{Cell, Color};
use std::path::PathBuf;
use std::process::ExitCode;

use workbench_core::application::{ValidationOutcome, validate_dataset};

use crate::cli::OutputFormat;
use crate::commands::{load_config, new_table, percent, read_dataset};

pub fn execute(
    dataset_path: PathBuf,
    indicator: Option<String>,
    format: OutputFormat,
    project_dir: PathBuf,
) -> anyhow::Result<ExitCode> {
    let config = load_config(&project_dir)?;
    let dataset = read_dataset(&dataset_path)?;

    let outcome = validate_dataset(dataset, &config, indicator.as_deref())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Table => print_outcome(&outcome),
    }

    // Non-zero exit lets CI gate on the review.
    Ok(if outcome.report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_outcome(outcome: &ValidationOutcome) {
    let report = &outcome.report;
    println!("📋 Rule set: {}", outcome.rule_set);
    println!("   {}", outcome.status);
    println!(
        "   Compliant: {} | Non-compliant: {} | Compliance rate: {}",
        report.compliant_count,
        report.non_compliant_count,
        percent(report.compliance_rate())
    );

    if let Some(assessment) = &outcome.assessment {
        println!(
            "   {} {}: observed {} against threshold {} ({})",
            assessment.kind,
            assessment.indicator_id,
            percent(assessment.observed),
            percent(assessment.threshold),
            assessment.status.as_str()
        );
    }

    if report.is_clean() {
        println!("✅ No violations.");
        return;
    }

    let mut table = new_table(&["Row", "Reason"]);
    for row in &report.non_compliant_rows {
        table.add_row(vec![
            Cell::new(row.row_number),
            Cell::new(&row.reason).fg(Color::Red),
        ]);
    }
    println!("{table}");
}
