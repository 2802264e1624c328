// workbench/src/commands/sources.rs
//
// USE CASE: Discover and sync data sources.

use comfy_table::{Cell, Color};
use std::path::PathBuf;
use std::process::ExitCode;

use workbench_core::application::{SyncReport, sync_sources};
use workbench_core::domain::sources::{SourceRegistry, SyncStatus};
use workbench_core::infrastructure::adapters::CsvFileSource;
use workbench_core::infrastructure::config::{
    DiscoverOptions, discover_sources, load_sources, save_sources,
};

use crate::cli::OutputFormat;
use crate::commands::{load_config, new_table, percent};

pub fn discover(
    project_dir: PathBuf,
    data_dir: Option<String>,
    options: DiscoverOptions,
) -> anyhow::Result<()> {
    let config = load_config(&project_dir)?;
    let data_dir = data_dir.unwrap_or(config.data_path);

    println!(
        "🕵️  Scanning for sources in '{}/{}'...",
        project_dir.display(),
        data_dir
    );

    let source_list = discover_sources(&project_dir, &data_dir, &options)?;
    println!("📝 Found {} sources.", source_list.sources.len());

    save_sources(&project_dir, &source_list)?;
    println!("✨ sources.yaml updated successfully!");
    Ok(())
}

pub async fn sync(
    names: Vec<String>,
    format: OutputFormat,
    project_dir: PathBuf,
) -> anyhow::Result<ExitCode> {
    let config = load_config(&project_dir)?;
    let registry = SourceRegistry::new(load_sources(&project_dir)?);

    let names = if names.is_empty() {
        registry.names()
    } else {
        names
    };
    if names.is_empty() {
        println!("Nothing to sync. Run `workbench sources discover` first.");
        return Ok(ExitCode::SUCCESS);
    }

    let adapter = CsvFileSource::new(&project_dir);
    let reports = sync_sources(&registry, &adapter, &config, &names).await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Table => print_reports(&reports),
    }

    let failed = reports
        .iter()
        .any(|r| matches!(r.status, SyncStatus::Error { .. }));
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_reports(reports: &[SyncReport]) {
    let mut table = new_table(&[
        "Source",
        "Status",
        "Rows",
        "Non-compliant",
        "Compliance",
        "Detail",
    ]);
    for report in reports {
        let (rows, detail, color) = match &report.status {
            SyncStatus::Synced { rows, at } => (rows.to_string(), at.to_rfc3339(), Color::Green),
            SyncStatus::Error { message } => ("-".to_string(), message.clone(), Color::Red),
            other => ("-".to_string(), String::new(), status_color(other)),
        };
        let (non_compliant, compliance) = report.validation.as_ref().map_or(
            ("-".to_string(), "-".to_string()),
            |v| {
                (
                    v.report.non_compliant_count.to_string(),
                    percent(v.report.compliance_rate()),
                )
            },
        );
        table.add_row(vec![
            Cell::new(&report.source),
            Cell::new(report.status.label()).fg(color),
            Cell::new(rows),
            Cell::new(non_compliant),
            Cell::new(compliance),
            Cell::new(detail),
        ]);
    }
    println!("{table}");
}

fn status_color(status: &SyncStatus) -> Color {
    match status {
        SyncStatus::Syncing => Color::Yellow,
        _ => Color::Grey,
    }
}
