// workbench-core/src/ports/source.rs

// What the application needs from a data source: give me the current dataset.
// Whether it comes from a CSV on disk or a remote export is the adapter's business.

use async_trait::async_trait;

use crate::domain::dataset::Dataset;
use crate::domain::sources::SourceConfig;
use crate::error::WorkbenchError;

#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self, source: &SourceConfig) -> Result<Dataset, WorkbenchError>;
}
