// workbench/src/commands/quality.rs
//
// USE CASE: Column quality profile.

use comfy_table::Cell;
use std::path::PathBuf;

use workbench_core::application::profile_dataset;

use crate::cli::OutputFormat;
use crate::commands::{load_config, new_table, percent, read_dataset};

pub fn execute(
    dataset_path: PathBuf,
    format: OutputFormat,
    project_dir: PathBuf,
) -> anyhow::Result<()> {
    let config = load_config(&project_dir)?;
    let dataset = read_dataset(&dataset_path)?;
    let report = profile_dataset(&dataset, &config);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("📊 {} row(s), {} column(s)", dataset.len(), report.columns.len());
    let mut table = new_table(&[
        "Column",
        "Format",
        "Completeness",
        "Uniqueness",
        "Format validity",
    ]);
    for profile in &report.columns {
        table.add_row(vec![
            Cell::new(&profile.column),
            Cell::new(profile.format.map_or("-", |f| f.as_str())),
            Cell::new(percent(profile.quality.completeness)),
            Cell::new(percent(profile.quality.uniqueness)),
            Cell::new(profile.quality.format_validity.map_or("-".to_string(), percent)),
        ]);
    }
    println!("{table}");
    Ok(())
}
