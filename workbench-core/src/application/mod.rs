// workbench-core/src/application/mod.rs

pub mod export;
pub mod integrations;
pub mod profile;
pub mod sync;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use workbench_core::application::{validate_dataset, export_dataset};`
// without knowing the file layout.

pub use export::{ExportSummary, ResolveOutcome, export_dataset, resolve_row};
pub use integrations::{IntegrationCheck, check_integrations};
pub use profile::profile_dataset;
pub use sync::{SyncReport, sync_sources};
pub use validation::{ValidationOutcome, open_review, validate_dataset};
