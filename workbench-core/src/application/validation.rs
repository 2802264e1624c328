// workbench-core/src/application/validation.rs

use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::dataset::Dataset;
use crate::domain::indicator::IndicatorAssessment;
use crate::domain::project::ProjectConfig;
use crate::domain::report::ComplianceReport;
use crate::domain::review::{ReviewSession, ReviewState};
use crate::domain::rules::{DEFAULT_RULE_SET, RuleSet};
use crate::error::WorkbenchError;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub rule_set: String,
    pub state: ReviewState,
    pub status: String,
    pub report: ComplianceReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<IndicatorAssessment>,
}

/// Rule set id and rules for `indicator`: the indicator's own rule set, a rule
/// set of that id, or the built-in default.
fn select_rule_set(
    config: &ProjectConfig,
    indicator: Option<&str>,
) -> Result<(String, RuleSet), WorkbenchError> {
    let catalog = config.rule_catalog()?;
    let requested = indicator.map(|id| config.indicator(id).map_or(id, |ind| ind.rule_set_id()));

    Ok(match requested.filter(|id| catalog.contains(id)) {
        Some(id) => (id.to_string(), catalog.resolve(Some(id)).clone()),
        None => (DEFAULT_RULE_SET.to_string(), catalog.resolve(None).clone()),
    })
}

/// Opens a review on `dataset` with the rule set of `indicator`.
pub fn open_review(
    dataset: Dataset,
    config: &ProjectConfig,
    indicator: Option<&str>,
) -> Result<ReviewSession, WorkbenchError> {
    let (id, rule_set) = select_rule_set(config, indicator)?;
    info!(rule_set = %id, "Rule set selected");
    Ok(ReviewSession::new(
        dataset,
        rule_set,
        config.validation_options(),
    ))
}

/// Runs one validation pass and, when the indicator is known, assesses it.
#[instrument(skip(dataset, config), fields(rows = dataset.len()))]
pub fn validate_dataset(
    dataset: Dataset,
    config: &ProjectConfig,
    indicator: Option<&str>,
) -> Result<ValidationOutcome, WorkbenchError> {
    let (rule_set_id, rule_set) = select_rule_set(config, indicator)?;
    info!(rule_set = %rule_set_id, "Rule set selected");

    let mut session = ReviewSession::new(dataset, rule_set, config.validation_options());
    let report = session.validate().clone();

    let assessment = indicator
        .and_then(|id| config.indicator(id))
        .map(|ind| ind.assess(&report));

    Ok(ValidationOutcome {
        rule_set: rule_set_id,
        state: session.state(),
        status: session.status_message(),
        report,
        assessment,
    })
}
