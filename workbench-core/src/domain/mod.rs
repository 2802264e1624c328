// workbench-core/src/domain/mod.rs

pub mod dataset;
pub mod error;
pub mod formats;
pub mod indicator;
pub mod integration;
pub mod project;
pub mod quality;
pub mod report;
pub mod review;
pub mod rules;
pub mod sources;
pub mod validation;

// Re-exports to keep imports short elsewhere
pub use dataset::{Dataset, RowRecord};
pub use error::DomainError;
pub use report::{ComplianceReport, NonCompliantRow};
pub use review::{ReviewSession, ReviewState};
pub use validation::{ValidationOptions, validate};
