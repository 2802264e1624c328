// workbench-core/src/domain/review.rs

use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::domain::dataset::Dataset;
use crate::domain::error::DomainError;
use crate::domain::report::ComplianceReport;
use crate::domain::rules::RuleSet;
use crate::domain::validation::{ValidationOptions, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    Unvalidated,
    HasViolations,
    AllResolved,
}

impl ReviewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unvalidated => "unvalidated",
            Self::HasViolations => "has_violations",
            Self::AllResolved => "all_resolved",
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reviewer's pass over one dataset.
///
/// ```text
///                           +--resolve_row--+
///                           v               |
/// Unvalidated --validate--> HasViolations --+--resolve_row--> AllResolved
///      ^                                                          |
///      +-------------------------load_dataset---------------------+
/// ```
///
/// `AllResolved` is terminal until new data is loaded. Promotion and download
/// are only available there.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    dataset: Dataset,
    rule_set: RuleSet,
    options: ValidationOptions,
    state: ReviewState,
    report: Option<ComplianceReport>,
}

impl ReviewSession {
    pub fn new(dataset: Dataset, rule_set: RuleSet, options: ValidationOptions) -> Self {
        Self {
            dataset,
            rule_set,
            options,
            state: ReviewState::Unvalidated,
            report: None,
        }
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn report(&self) -> Option<&ComplianceReport> {
        self.report.as_ref()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn validate(&mut self) -> &ComplianceReport {
        let report = validate(&self.dataset, &self.rule_set, &self.options);
        self.state = if report.is_clean() {
            ReviewState::AllResolved
        } else {
            ReviewState::HasViolations
        };
        let report = self.report.insert(report);
        info!(state = %self.state, "{}", status_message(Some(&*report)));
        report
    }

    /// Replaces a row flagged in the current report and re-runs validation.
    pub fn resolve_row(
        &mut self,
        row_number: usize,
        values: Vec<String>,
    ) -> Result<&ComplianceReport, DomainError> {
        if self.state != ReviewState::HasViolations {
            return Err(DomainError::InvalidTransition {
                action: "resolve a row",
                state: self.state,
            });
        }
        if self.dataset.record(row_number).is_none() {
            return Err(DomainError::RowNotFound {
                row_number,
                len: self.dataset.len(),
            });
        }
        if self.report.as_ref().and_then(|r| r.find(row_number)).is_none() {
            return Err(DomainError::RowNotFlagged(row_number));
        }
        self.dataset.replace_row(row_number, values)?;
        Ok(self.validate())
    }

    /// Swaps in new data; the review starts over.
    pub fn load_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.state = ReviewState::Unvalidated;
        self.report = None;
    }

    /// The reviewed dataset, once every row is compliant.
    pub fn promote(&self) -> Result<&Dataset, DomainError> {
        match self.state {
            ReviewState::AllResolved => Ok(&self.dataset),
            ReviewState::HasViolations => Err(DomainError::UnresolvedViolations(
                self.report.as_ref().map_or(0, |r| r.non_compliant_count),
            )),
            ReviewState::Unvalidated => Err(DomainError::InvalidTransition {
                action: "promote",
                state: self.state,
            }),
        }
    }

    pub fn status_message(&self) -> String {
        status_message(self.report.as_ref())
    }
}

fn status_message(report: Option<&ComplianceReport>) -> String {
    match report {
        None => "Dataset not validated yet".to_string(),
        Some(r) if r.is_clean() => format!("All {} row(s) are compliant", r.total_rows),
        Some(r) => format!(
            "Validation complete: {} non-compliant row(s) out of {}",
            r.non_compliant_count, r.total_rows
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session() -> ReviewSession {
        let ds = Dataset::new(
            vec!["employee_id".into(), "employee_email".into()],
            vec![
                vec!["E1".into(), "a@x.com".into()],
                vec!["E2".into(), "broken".into()],
            ],
        )
        .unwrap();
        ReviewSession::new(
            ds,
            RuleSet::user_access_review(),
            ValidationOptions::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()),
        )
    }

    #[test]
    fn test_full_review_cycle() {
        let mut s = session();
        assert_eq!(s.state(), ReviewState::Unvalidated);
        assert_eq!(s.status_message(), "Dataset not validated yet");

        let report = s.validate();
        assert_eq!(report.non_compliant_count, 1);
        assert_eq!(s.state(), ReviewState::HasViolations);
        assert!(matches!(
            s.promote(),
            Err(DomainError::UnresolvedViolations(1))
        ));

        let report = s.resolve_row(2, vec!["E2".into(), "b@x.com".into()]).unwrap();
        assert!(report.is_clean());
        assert_eq!(s.state(), ReviewState::AllResolved);
        assert_eq!(s.status_message(), "All 2 row(s) are compliant");
        assert_eq!(s.promote().unwrap().rows()[1][1], "b@x.com");
    }

    #[test]
    fn test_resolve_requires_validation() {
        let mut s = session();
        assert!(matches!(
            s.resolve_row(1, vec!["E1".into(), "a@x.com".into()]),
            Err(DomainError::InvalidTransition {
                state: ReviewState::Unvalidated,
                ..
            })
        ));
    }

    #[test]
    fn test_new_data_reopens_review() {
        let mut s = session();
        s.validate();
        s.resolve_row(2, vec!["E2".into(), "b@x.com".into()]).unwrap();
        assert_eq!(s.state(), ReviewState::AllResolved);

        let bad = Dataset::new(
            vec!["employee_id".into()],
            vec![vec!["E9".into()], vec!["E9".into()]],
        )
        .unwrap();
        s.load_dataset(bad);
        assert_eq!(s.state(), ReviewState::Unvalidated);
        assert!(s.report().is_none());

        s.validate();
        assert_eq!(s.state(), ReviewState::HasViolations);
    }

    #[test]
    fn test_resolving_with_still_bad_data_stays_open() {
        let mut s = session();
        s.validate();
        let report = s.resolve_row(2, vec!["E1".into(), "b@x.com".into()]).unwrap();
        // Fixed the email but introduced a duplicate id.
        assert_eq!(report.non_compliant_count, 2);
        assert_eq!(s.state(), ReviewState::HasViolations);
    }

    #[test]
    fn test_all_resolved_is_terminal() {
        let mut s = session();
        s.validate();
        s.resolve_row(2, vec!["E2".into(), "b@x.com".into()]).unwrap();
        assert_eq!(s.state(), ReviewState::AllResolved);

        assert!(matches!(
            s.resolve_row(1, vec!["E1".into(), "broken".into()]),
            Err(DomainError::InvalidTransition {
                state: ReviewState::AllResolved,
                ..
            })
        ));
        assert_eq!(s.state(), ReviewState::AllResolved);
        assert_eq!(s.dataset().rows()[0][1], "a@x.com");
        assert!(s.promote().is_ok());
    }

    #[test]
    fn test_only_flagged_rows_can_be_resolved() {
        let mut s = session();
        s.validate();

        assert!(matches!(
            s.resolve_row(1, vec!["E1".into(), "broken".into()]),
            Err(DomainError::RowNotFlagged(1))
        ));
        assert!(matches!(
            s.resolve_row(7, vec!["E7".into(), "g@x.com".into()]),
            Err(DomainError::RowNotFound { row_number: 7, .. })
        ));
        assert_eq!(s.state(), ReviewState::HasViolations);
        assert_eq!(s.dataset().rows()[0][1], "a@x.com");
        assert_eq!(s.report().unwrap().non_compliant_count, 1);
    }
}
