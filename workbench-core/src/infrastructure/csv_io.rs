// workbench-core/src/infrastructure/csv_io.rs

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};

use crate::domain::dataset::Dataset;
use crate::error::WorkbenchError;
use crate::infrastructure::error::InfrastructureError;

/// Reads a headed CSV into raw headers and rows.
///
/// Ragged rows are let through so that [`Dataset::new`] can report the
/// exact row number.
pub fn read_records<R: Read>(
    reader: R,
) -> Result<(Vec<String>, Vec<Vec<String>>), InfrastructureError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok((headers, rows))
}

pub fn parse_dataset<R: Read>(reader: R) -> Result<Dataset, WorkbenchError> {
    let (headers, rows) = read_records(reader)?;
    Ok(Dataset::new(headers, rows)?)
}

#[instrument]
pub fn load_dataset(path: &Path) -> Result<Dataset, WorkbenchError> {
    let file = File::open(path)?;
    let dataset = parse_dataset(file)?;
    debug!(rows = dataset.len(), columns = dataset.headers().len(), "Dataset loaded");
    Ok(dataset)
}

/// Header row then data rows, `\n` separated, no trailing newline.
/// Values holding a comma, quote or line break are quoted.
pub fn to_csv_string(dataset: &Dataset) -> Result<String, InfrastructureError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(dataset.headers())?;
    for row in dataset.rows() {
        wtr.write_record(row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| InfrastructureError::Io(e.into_error()))?;
    let mut out = String::from_utf8(bytes)?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<(), InfrastructureError> {
    let content = to_csv_string(dataset)?;
    crate::infrastructure::fs::atomic_write(path, content)
}
