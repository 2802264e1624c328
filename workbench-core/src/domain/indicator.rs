// workbench-core/src/domain/indicator.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::report::ComplianceReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorKind {
    /// Key Risk Indicator: threshold is the highest tolerated non-compliance rate.
    #[default]
    Kri,
    /// Key Performance Indicator: threshold is the lowest acceptable compliance rate.
    Kpi,
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kri => write!(f, "KRI"),
            Self::Kpi => write!(f, "KPI"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Indicator {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: IndicatorKind,
    /// Rule set id; defaults to the indicator id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_set: Option<String>,
    /// Percentage, see [`IndicatorKind`].
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

fn default_threshold() -> f64 {
    5.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStatus {
    WithinAppetite,
    Breached,
    NoData,
}

impl IndicatorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithinAppetite => "within appetite",
            Self::Breached => "breached",
            Self::NoData => "no data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorAssessment {
    pub indicator_id: String,
    pub kind: IndicatorKind,
    /// The rate compared against the threshold (non-compliance for KRI, compliance for KPI).
    pub observed: f64,
    pub threshold: f64,
    pub status: IndicatorStatus,
}

impl Indicator {
    pub fn rule_set_id(&self) -> &str {
        self.rule_set.as_deref().unwrap_or(&self.id)
    }

    pub fn assess(&self, report: &ComplianceReport) -> IndicatorAssessment {
        let (observed, within) = match self.kind {
            IndicatorKind::Kri => {
                let rate = report.non_compliance_rate();
                (rate, rate <= self.threshold)
            }
            IndicatorKind::Kpi => {
                let rate = report.compliance_rate();
                (rate, rate >= self.threshold)
            }
        };

        let status = if report.total_rows == 0 {
            IndicatorStatus::NoData
        } else if within {
            IndicatorStatus::WithinAppetite
        } else {
            IndicatorStatus::Breached
        };

        IndicatorAssessment {
            indicator_id: self.id.clone(),
            kind: self.kind,
            observed,
            threshold: self.threshold,
            status,
        }
    }
}
