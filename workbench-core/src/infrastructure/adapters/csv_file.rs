// workbench-core/src/infrastructure/adapters/csv_file.rs

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, instrument};

use crate::domain::dataset::Dataset;
use crate::domain::sources::SourceConfig;
use crate::error::WorkbenchError;
use crate::infrastructure::csv_io::parse_dataset;
use crate::ports::source::DatasetSource;

/// Reads source files relative to a project root.
pub struct CsvFileSource {
    root: PathBuf,
}

impl CsvFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DatasetSource for CsvFileSource {
    #[instrument(skip(self, source), fields(source = %source.name))]
    async fn fetch(&self, source: &SourceConfig) -> Result<Dataset, WorkbenchError> {
        let path = self.root.join(&source.path);
        let bytes = tokio::fs::read(&path).await?;
        let dataset = parse_dataset(bytes.as_slice())?;
        debug!(path = %path.display(), rows = dataset.len(), "Fetched");
        Ok(dataset)
    }
}
