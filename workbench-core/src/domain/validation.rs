// workbench-core/src/domain/validation.rs

use chrono::{NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{info, instrument, warn};

use crate::domain::dataset::Dataset;
use crate::domain::formats;
use crate::domain::report::{ComplianceReport, NonCompliantRow};
use crate::domain::rules::{EvaluationContext, RuleSet};

pub const DEFAULT_IDENTIFIER_COLUMN: &str = "employee_id";

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOptions {
    /// Column whose values must be unique across rows. `None` disables the check.
    pub identifier_column: Option<String>,
    /// "Today" for age-based checks. Fixed per pass so results are reproducible.
    pub reference_date: NaiveDate,
}

impl ValidationOptions {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            identifier_column: Some(DEFAULT_IDENTIFIER_COLUMN.to_string()),
            reference_date,
        }
    }

    pub fn with_identifier_column(mut self, column: Option<String>) -> Self {
        self.identifier_column = column;
        self
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

/// Classifies every row of `dataset` against `rule_set`.
///
/// A row appears at most once in the report. Field-rule messages come first,
/// in rule order, followed by the duplicate-identifier message when the row's
/// identifier is shared with another row. Rules naming a column the dataset
/// does not have are skipped.
#[instrument(skip_all, fields(rows = dataset.len(), rules = rule_set.rules.len()))]
pub fn validate(
    dataset: &Dataset,
    rule_set: &RuleSet,
    options: &ValidationOptions,
) -> ComplianceReport {
    let ctx = EvaluationContext {
        reference_date: options.reference_date,
    };

    for field in absent_fields(dataset, rule_set) {
        warn!(field, "Rules skipped: column not present in dataset");
    }

    // row_number -> collected messages
    let mut violations: BTreeMap<usize, Vec<String>> = BTreeMap::new();

    for (idx, record) in dataset.records().enumerate() {
        let failures: Vec<String> = rule_set
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(&record, &ctx))
            .collect();
        if !failures.is_empty() {
            violations.insert(idx + 1, failures);
        }
    }

    if let Some(column) = options.identifier_column.as_deref() {
        for (row_number, message) in duplicate_identifiers(dataset, column) {
            violations.entry(row_number).or_default().push(message);
        }
    }

    let non_compliant_rows: Vec<NonCompliantRow> = violations
        .into_iter()
        .map(|(row_number, messages)| NonCompliantRow {
            row_number,
            reason: messages.join("; "),
            row_data: dataset
                .record(row_number)
                .map(|r| r.values().to_vec())
                .unwrap_or_default(),
        })
        .collect();

    let total_rows = dataset.len();
    let non_compliant_count = non_compliant_rows.len();
    let report = ComplianceReport {
        total_rows,
        compliant_count: total_rows - non_compliant_count,
        non_compliant_count,
        non_compliant_rows,
    };

    info!(
        compliant = report.compliant_count,
        non_compliant = report.non_compliant_count,
        "Validation pass complete"
    );
    report
}

/// Rule fields the dataset has no column for, each listed once.
fn absent_fields<'a>(dataset: &Dataset, rule_set: &'a RuleSet) -> BTreeSet<&'a str> {
    rule_set
        .rules
        .iter()
        .map(|rule| rule.field.as_str())
        .filter(|field| !dataset.has_column(field))
        .collect()
}

/// Every occurrence of an identifier value seen more than once, with its message.
/// Values are compared as written. Blank identifiers are left to completeness checks.
fn duplicate_identifiers(dataset: &Dataset, column: &str) -> Vec<(usize, String)> {
    let Some(col_idx) = dataset.column_index(column) else {
        return Vec::new();
    };

    // value -> row numbers, in first-seen order
    let mut order: Vec<&str> = Vec::new();
    let mut seen: HashMap<&str, Vec<usize>> = HashMap::new();

    for (idx, value) in dataset.column_values(col_idx).enumerate() {
        if formats::is_blank(value) {
            continue;
        }
        let key = value;
        seen.entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(idx + 1);
    }

    let mut flagged = Vec::new();
    for key in order {
        let Some(rows) = seen.get(key) else { continue };
        if rows.len() < 2 {
            continue;
        }
        let listed = rows
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        warn!(column, value = key, rows = %listed, "Duplicate identifier");
        for &row_number in rows {
            flagged.push((
                row_number,
                format!("Duplicate {} '{}' (rows {})", column, key, listed),
            ));
        }
    }
    flagged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::rules::{Check, FieldRule, RuleMessage};

    fn options() -> ValidationOptions {
        ValidationOptions::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    }

    fn dataset(headers: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_default_rules_flag_bad_email() {
        let ds = dataset(
            &["employee_email", "access_level", "status"],
            &[&["a@x.com", "Admin", "Active"], &["bad-email", "User", "Active"]],
        );

        let report = validate(&ds, &RuleSet::user_access_review(), &options());

        assert_eq!(report.compliant_count, 1);
        assert_eq!(report.non_compliant_count, 1);
        let row = &report.non_compliant_rows[0];
        assert_eq!(row.row_number, 2);
        assert!(row.reason.starts_with("Invalid or missing email format"));
        assert_eq!(row.row_data, vec!["bad-email", "User", "Active"]);
    }

    #[test]
    fn test_duplicate_ids_flag_every_occurrence() {
        let ds = dataset(
            &["employee_id", "status"],
            &[&["E1", "Active"], &["E2", "Active"], &["E1", "Active"]],
        );

        let report = validate(&ds, &RuleSet::user_access_review(), &options());

        assert_eq!(report.non_compliant_count, 2);
        assert_eq!(report.compliant_count, 1);
        let numbers: Vec<usize> = report
            .non_compliant_rows
            .iter()
            .map(|r| r.row_number)
            .collect();
        assert_eq!(numbers, vec![1, 3]);
        assert!(
            report
                .non_compliant_rows
                .iter()
                .all(|r| r.reason == "Duplicate employee_id 'E1' (rows 1, 3)")
        );
    }

    #[test]
    fn test_duplicate_merges_with_field_failures() {
        let ds = dataset(
            &["employee_id", "employee_email"],
            &[&["E1", "nope"], &["E1", "ok@corp.com"]],
        );

        let report = validate(&ds, &RuleSet::user_access_review(), &options());

        assert_eq!(report.non_compliant_count, 2);
        assert_eq!(report.compliant_count + report.non_compliant_count, 2);
        let first = report.find(1).unwrap();
        let reasons: Vec<&str> = first.reason.split("; ").collect();
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].starts_with("Invalid or missing email format"));
        assert!(reasons[1].starts_with("Duplicate employee_id"));
    }

    #[test]
    fn test_blank_identifiers_are_not_duplicates() {
        let ds = dataset(&["employee_id"], &[&[""], &[" "]]);
        let report = validate(&ds, &RuleSet::default(), &options());
        assert!(report.is_clean());
    }

    #[test]
    fn test_identifiers_are_compared_as_written() {
        let ds = dataset(&["employee_id"], &[&["E1"], &[" E1"]]);
        let report = validate(&ds, &RuleSet::default(), &options());
        assert!(report.is_clean());

        let ds = dataset(&["employee_id"], &[&[" E1"], &["E2"], &[" E1"]]);
        let report = validate(&ds, &RuleSet::default(), &options());
        assert_eq!(report.non_compliant_count, 2);
        assert_eq!(
            report.non_compliant_rows[0].reason,
            "Duplicate employee_id ' E1' (rows 1, 3)"
        );
    }

    #[test]
    fn test_absent_fields_are_listed_once() {
        let ds = dataset(&["employee_email", "status"], &[&["a@x.com", "Active"]]);
        let rules = RuleSet::user_access_review();
        let absent: Vec<&str> = absent_fields(&ds, &rules).into_iter().collect();
        assert_eq!(
            absent,
            vec!["access_level", "last_activity_days", "last_login_date"]
        );
    }

    #[test]
    fn test_identifier_check_can_be_disabled() {
        let ds = dataset(&["employee_id"], &[&["E1"], &["E1"]]);
        let opts = options().with_identifier_column(None);
        let report = validate(&ds, &RuleSet::default(), &opts);
        assert!(report.is_clean());
    }

    #[test]
    fn test_empty_dataset() {
        let ds = dataset(&["employee_email"], &[]);
        let report = validate(&ds, &RuleSet::user_access_review(), &options());
        assert_eq!(report.compliant_count, 0);
        assert_eq!(report.non_compliant_count, 0);
        assert!(report.non_compliant_rows.is_empty());
    }

    #[test]
    fn test_all_failures_are_joined_in_rule_order() {
        let ds = dataset(
            &["access_level", "status", "last_login_date"],
            &[&["Admin", "Terminated", "2020-01-01"]],
        );

        let report = validate(&ds, &RuleSet::user_access_review(), &options());
        let reason = &report.non_compliant_rows[0].reason;
        let parts: Vec<&str> = reason.split("; ").collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], "Privileged access 'Admin' retained by Terminated account");
        assert!(parts[1].starts_with("Last login '2020-01-01'"));
    }

    #[test]
    fn test_custom_rule_sees_whole_row() {
        let rule_set = RuleSet {
            description: "custom".into(),
            rules: vec![FieldRule::new(
                "end",
                Check::custom(|value, row, _| {
                    row.get("start")
                        .is_some_and(|start| start <= value)
                }),
                RuleMessage::dynamic(|ctx| {
                    format!(
                        "end {} precedes start {}",
                        ctx.value,
                        ctx.row.get("start").unwrap_or_default()
                    )
                }),
            )],
        };
        let ds = dataset(
            &["start", "end"],
            &[&["2024-01-01", "2024-02-01"], &["2024-03-01", "2024-02-01"]],
        );

        let report = validate(&ds, &rule_set, &options());
        assert_eq!(report.non_compliant_count, 1);
        assert_eq!(
            report.non_compliant_rows[0].reason,
            "end 2024-02-01 precedes start 2024-03-01"
        );
    }

    #[test]
    fn test_validation_does_not_mutate_input_and_is_deterministic() {
        let ds = dataset(
            &["employee_id", "employee_email"],
            &[&["E1", "x"], &["E2", "y@z.io"]],
        );
        let before = ds.clone();
        let rules = RuleSet::user_access_review();

        let a = validate(&ds, &rules, &options());
        let b = validate(&ds, &rules, &options());

        assert_eq!(a, b);
        assert_eq!(ds, before);
    }
}
