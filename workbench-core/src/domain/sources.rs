// workbench-core/src/domain/sources.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::domain::error::DomainError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SourceConfig {
    pub name: String,
    /// Relative to the project directory (ex: "data/access_review.csv").
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Indicator whose rule set applies to this source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SourceList {
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncStatus {
    Idle,
    Syncing,
    Synced { rows: usize, at: DateTime<Utc> },
    Error { message: String },
}

impl SyncStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Syncing => "syncing",
            Self::Synced { .. } => "synced",
            Self::Error { .. } => "error",
        }
    }
}

#[derive(Debug, Clone)]
struct SourceEntry {
    config: SourceConfig,
    status: SyncStatus,
}

/// Known data sources and their sync status.
///
/// The `Syncing` status doubles as a per-source lock: a second sync of the
/// same source is refused until the first one finishes. Nothing else is
/// coordinated and failures are not retried.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    entries: Mutex<BTreeMap<String, SourceEntry>>,
}

impl SourceRegistry {
    pub fn new(sources: impl IntoIterator<Item = SourceConfig>) -> Self {
        let entries = sources
            .into_iter()
            .map(|config| {
                (
                    config.name.clone(),
                    SourceEntry {
                        config,
                        status: SyncStatus::Idle,
                    },
                )
            })
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, SourceEntry>> {
        // The map stays consistent even if a holder panicked mid-update.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn status(&self, name: &str) -> Option<SyncStatus> {
        self.lock().get(name).map(|e| e.status.clone())
    }

    pub fn snapshot(&self) -> Vec<(SourceConfig, SyncStatus)> {
        self.lock()
            .values()
            .map(|e| (e.config.clone(), e.status.clone()))
            .collect()
    }

    /// Marks the source as syncing and hands back its config.
    pub fn begin_sync(&self, name: &str) -> Result<SourceConfig, DomainError> {
        let mut entries = self.lock();
        let entry = entries
            .get_mut(name)
            .ok_or_else(|| DomainError::UnknownSource(name.to_string()))?;

        if entry.status == SyncStatus::Syncing {
            warn!(source = name, "Sync already running, refusing to start another");
            return Err(DomainError::SyncInProgress(name.to_string()));
        }

        entry.status = SyncStatus::Syncing;
        info!(source = name, "Sync started");
        Ok(entry.config.clone())
    }

    /// Records the outcome of a sync started with [`Self::begin_sync`].
    pub fn finish_sync(
        &self,
        name: &str,
        outcome: Result<usize, String>,
    ) -> Result<SyncStatus, DomainError> {
        let mut entries = self.lock();
        let entry = entries
            .get_mut(name)
            .ok_or_else(|| DomainError::UnknownSource(name.to_string()))?;

        entry.status = match outcome {
            Ok(rows) => {
                info!(source = name, rows, "Sync finished");
                SyncStatus::Synced {
                    rows,
                    at: Utc::now(),
                }
            }
            Err(message) => {
                warn!(source = name, %message, "Sync failed");
                SyncStatus::Error { message }
            }
        };
        Ok(entry.status.clone())
    }
}
