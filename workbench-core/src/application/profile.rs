// workbench-core/src/application/profile.rs

use tracing::{debug, instrument};

use crate::domain::dataset::Dataset;
use crate::domain::project::ProjectConfig;
use crate::domain::quality::{ColumnQualityReport, compute_column_quality};

/// Column quality metrics using the project's schema bindings plus name-based inference.
#[instrument(skip_all, fields(rows = dataset.len()))]
pub fn profile_dataset(dataset: &Dataset, config: &ProjectConfig) -> ColumnQualityReport {
    let bindings = config.schema_bindings(dataset.headers());
    debug!(bound = bindings.len(), "Schema bindings resolved");
    compute_column_quality(dataset, &bindings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::quality::FieldFormat;

    #[test]
    fn test_project_schema_is_applied() {
        let ds = Dataset::new(
            vec!["badge".into(), "employee_email".into()],
            vec![vec!["12".into(), "a@x.com".into()], vec!["x".into(), "b@x.com".into()]],
        )
        .unwrap();
        let mut cfg = ProjectConfig::default();
        cfg.schema.insert("badge".into(), FieldFormat::Numeric);

        let report = profile_dataset(&ds, &cfg);
        assert_eq!(report.get("badge").unwrap().format_validity, Some(50.0));
        assert_eq!(report.get("employee_email").unwrap().format_validity, Some(100.0));
    }
}
