// workbench/src/commands/resolve.rs
//
// USE CASE: Fix one flagged row in place.

use std::path::PathBuf;

use workbench_core::WorkbenchError;
use workbench_core::application::resolve_row;
use workbench_core::domain::error::DomainError;
use workbench_core::domain::review::ReviewState;
use workbench_core::infrastructure::csv_io::write_dataset;

use crate::commands::{load_config, read_dataset};

pub struct ResolveArgs {
    pub dataset: PathBuf,
    pub row: usize,
    pub edits: Vec<(String, String)>,
    pub indicator: Option<String>,
    pub out: Option<PathBuf>,
    pub project_dir: PathBuf,
}

pub fn execute(args: ResolveArgs) -> anyhow::Result<()> {
    let config = load_config(&args.project_dir)?;
    let dataset = read_dataset(&args.dataset)?;

    let rows = dataset.len();
    let resolved = resolve_row(
        dataset,
        &config,
        args.indicator.as_deref(),
        args.row,
        &args.edits,
    );
    let (updated, outcome) = match resolved {
        Err(WorkbenchError::Domain(DomainError::InvalidTransition {
            state: ReviewState::AllResolved,
            ..
        })) => {
            println!("✅ Nothing to resolve: all {} row(s) are compliant", rows);
            return Ok(());
        }
        other => other?,
    };

    let target = args.out.unwrap_or(args.dataset);
    write_dataset(&target, &updated)?;

    println!("🩹 Row {} updated in {}", args.row, target.display());
    println!("   {}", outcome.status);

    if let Some(still) = outcome.report.find(args.row) {
        eprintln!("⚠️  Row {} is still non-compliant: {}", args.row, still.reason);
    }
    Ok(())
}
