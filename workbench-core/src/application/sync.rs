// workbench-core/src/application/sync.rs

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, instrument};

use crate::application::validation::{ValidationOutcome, validate_dataset};
use crate::domain::project::ProjectConfig;
use crate::domain::sources::{SourceRegistry, SyncStatus};
use crate::error::WorkbenchError;
use crate::ports::source::DatasetSource;

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub source: String,
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationOutcome>,
}

/// Fetches every named source concurrently and validates what came back.
///
/// A source that is already syncing, or unknown, is reported as an error
/// without touching its registry entry.
#[instrument(skip_all, fields(count = names.len()))]
pub async fn sync_sources(
    registry: &SourceRegistry,
    adapter: &dyn DatasetSource,
    config: &ProjectConfig,
    names: &[String],
) -> Vec<SyncReport> {
    let tasks = names
        .iter()
        .map(|name| sync_one(registry, adapter, config, name));
    let reports = join_all(tasks).await;

    let failed = reports
        .iter()
        .filter(|r| matches!(r.status, SyncStatus::Error { .. }))
        .count();
    info!(synced = reports.len() - failed, failed, "Sync round finished");
    reports
}

async fn sync_one(
    registry: &SourceRegistry,
    adapter: &dyn DatasetSource,
    config: &ProjectConfig,
    name: &str,
) -> SyncReport {
    let refused = |e: WorkbenchError| SyncReport {
        source: name.to_string(),
        status: SyncStatus::Error {
            message: e.to_string(),
        },
        validation: None,
    };

    let source = match registry.begin_sync(name) {
        Ok(source) => source,
        Err(e) => return refused(e.into()),
    };

    let fetched = adapter.fetch(&source).await.and_then(|dataset| {
        let rows = dataset.len();
        validate_dataset(dataset, config, source.indicator.as_deref()).map(|v| (rows, v))
    });

    let (outcome, validation) = match fetched {
        Ok((rows, validation)) => (Ok(rows), Some(validation)),
        Err(e) => (Err(e.to_string()), None),
    };

    match registry.finish_sync(name, outcome) {
        Ok(status) => SyncReport {
            source: name.to_string(),
            status,
            validation,
        },
        Err(e) => refused(e.into()),
    }
}
