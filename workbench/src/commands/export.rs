// workbench/src/commands/export.rs
//
// USE CASE: Export the reviewed dataset.

use std::path::{Path, PathBuf};

use workbench_core::application::export_dataset;

use crate::commands::{load_config, read_dataset};

pub fn execute(
    dataset_path: PathBuf,
    indicator: Option<String>,
    out: Option<PathBuf>,
    force: bool,
    project_dir: PathBuf,
) -> anyhow::Result<()> {
    let config = load_config(&project_dir)?;
    let dataset = read_dataset(&dataset_path)?;

    let out_path = out.unwrap_or_else(|| {
        project_dir
            .join(&config.target_path)
            .join(default_file_name(&dataset_path))
    });

    let summary = export_dataset(dataset, &config, indicator.as_deref(), &out_path, force)?;

    if summary.forced {
        eprintln!(
            "⚠️  Exported with {} unresolved non-compliant row(s).",
            summary.non_compliant_count
        );
    }
    println!("📤 {} row(s) written to {}", summary.rows, out_path.display());
    Ok(())
}

fn default_file_name(dataset_path: &Path) -> String {
    let stem = dataset_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "dataset".to_string());
    format!("{}_reviewed.csv", stem)
}
