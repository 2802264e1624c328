// workbench/src/commands/mod.rs

pub mod export;
pub mod integrations;
pub mod quality;
pub mod resolve;
pub mod sources;
pub mod validate;

use anyhow::Context;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use std::path::Path;

use workbench_core::domain::dataset::Dataset;
use workbench_core::domain::project::ProjectConfig;
use workbench_core::infrastructure::config::load_project_config_or_default;
use workbench_core::infrastructure::csv_io::load_dataset;

pub(crate) fn load_config(project_dir: &Path) -> anyhow::Result<ProjectConfig> {
    let config = load_project_config_or_default(project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {}",
            project_dir.display()
        )
    })?;
    tracing::debug!(project = %config.name, "Configuration ready");
    Ok(config)
}

pub(crate) fn read_dataset(path: &Path) -> anyhow::Result<Dataset> {
    load_dataset(path).with_context(|| format!("Failed to read dataset {}", path.display()))
}

pub(crate) fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    table
}

pub(crate) fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}
