// workbench-core/src/application/export.rs

use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::application::validation::open_review;
use crate::domain::dataset::Dataset;
use crate::domain::error::DomainError;
use crate::domain::project::ProjectConfig;
use crate::domain::report::ComplianceReport;
use crate::domain::review::ReviewState;
use crate::error::WorkbenchError;
use crate::infrastructure::csv_io::write_dataset;

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub rows: usize,
    pub forced: bool,
    pub non_compliant_count: usize,
}

/// Validates, then writes the dataset as CSV. Refuses while violations remain
/// unless `force` is set.
#[instrument(skip(dataset, config), fields(out = %out_path.display()))]
pub fn export_dataset(
    dataset: Dataset,
    config: &ProjectConfig,
    indicator: Option<&str>,
    out_path: &Path,
    force: bool,
) -> Result<ExportSummary, WorkbenchError> {
    let mut session = open_review(dataset, config, indicator)?;
    let non_compliant_count = session.validate().non_compliant_count;

    let dataset = match session.promote() {
        Ok(ds) => ds,
        Err(DomainError::UnresolvedViolations(n)) if force => {
            warn!(unresolved = n, "Exporting with unresolved violations (forced)");
            session.dataset()
        }
        Err(e) => return Err(e.into()),
    };

    write_dataset(out_path, dataset)?;
    info!(rows = dataset.len(), "Dataset exported");

    Ok(ExportSummary {
        rows: dataset.len(),
        forced: non_compliant_count > 0,
        non_compliant_count,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveOutcome {
    pub state: ReviewState,
    pub status: String,
    pub report: ComplianceReport,
}

/// Applies `column=value` edits to one flagged row, re-validates, and returns
/// the new dataset with its report.
///
/// A dataset that is already clean has nothing to resolve and is refused with
/// [`DomainError::InvalidTransition`].
pub fn resolve_row(
    dataset: Dataset,
    config: &ProjectConfig,
    indicator: Option<&str>,
    row_number: usize,
    edits: &[(String, String)],
) -> Result<(Dataset, ResolveOutcome), WorkbenchError> {
    let len = dataset.len();
    let mut values = dataset
        .record(row_number)
        .ok_or(DomainError::RowNotFound { row_number, len })?
        .values()
        .to_vec();

    for (column, value) in edits {
        let idx = dataset.column_index(column).ok_or_else(|| {
            DomainError::InvalidDataset(format!("no column named '{}'", column))
        })?;
        values[idx] = value.clone();
    }

    let mut session = open_review(dataset, config, indicator)?;
    session.validate();
    let report = session.resolve_row(row_number, values)?.clone();

    let outcome = ResolveOutcome {
        state: session.state(),
        status: session.status_message(),
        report,
    };
    Ok((session.dataset().clone(), outcome))
}
