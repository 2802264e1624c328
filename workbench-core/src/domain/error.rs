// workbench-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::review::ReviewState;

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum DomainError {
    #[error("Dataset Error: {0}")]
    #[diagnostic(
        code(workbench::domain::dataset),
        help("A dataset needs at least one column and unique, non-empty header names.")
    )]
    InvalidDataset(String),

    #[error("Row {row_number} has {found} values but the dataset declares {expected} columns")]
    #[diagnostic(
        code(workbench::domain::ragged_row),
        help("Every row must be aligned with the header row.")
    )]
    RaggedRow {
        row_number: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row_number} does not exist (dataset has {len} rows)")]
    #[diagnostic(code(workbench::domain::row_not_found))]
    RowNotFound { row_number: usize, len: usize },

    #[error("Rule set '{0}' has no rules array")]
    #[diagnostic(
        code(workbench::domain::missing_rules),
        help("Declare a `rules:` list under the rule set, even if it is empty.")
    )]
    MissingRules(String),

    #[error("Invalid rule on field '{field}': {reason}")]
    #[diagnostic(code(workbench::domain::invalid_rule))]
    InvalidRule { field: String, reason: String },

    #[error("Cannot {action} while the review is {state}")]
    #[diagnostic(
        code(workbench::domain::review_state),
        help("Run the validation first, then resolve every flagged row.")
    )]
    InvalidTransition {
        action: &'static str,
        state: ReviewState,
    },

    #[error("Row {0} is not flagged in the current report")]
    #[diagnostic(
        code(workbench::domain::row_not_flagged),
        help("Only rows listed as non-compliant can be resolved.")
    )]
    RowNotFlagged(usize),

    #[error("{0} non-compliant row(s) remain unresolved")]
    #[diagnostic(
        code(workbench::domain::unresolved),
        help("Resolve the flagged rows or pass --force to export anyway.")
    )]
    UnresolvedViolations(usize),

    #[error("Data source '{0}' is not registered")]
    #[diagnostic(code(workbench::domain::unknown_source))]
    UnknownSource(String),

    #[error("Data source '{0}' is already syncing")]
    #[diagnostic(
        code(workbench::domain::sync_in_progress),
        help("Wait for the running sync to finish before triggering another one.")
    )]
    SyncInProgress(String),

    #[error("Integration '{name}' is misconfigured: {details}")]
    #[diagnostic(code(workbench::domain::integration))]
    InvalidIntegration { name: String, details: String },
}
