// workbench-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum WorkbenchError {
    // --- DOMAIN ERRORS (rules, dataset shape, review flow) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

// Manual implementation to avoid a duplicate enum variant but keep `?` ergonomics
impl From<std::io::Error> for WorkbenchError {
    fn from(err: std::io::Error) -> Self {
        WorkbenchError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<csv::Error> for WorkbenchError {
    fn from(err: csv::Error) -> Self {
        WorkbenchError::Infrastructure(InfrastructureError::Csv(err))
    }
}
