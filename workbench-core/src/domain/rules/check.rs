// workbench-core/src/domain/rules/check.rs

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::domain::dataset::RowRecord;
use crate::domain::error::DomainError;
use crate::domain::formats::{self, ISO_DATE_FORMAT};

/// Inputs a check may need besides the row itself.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext {
    pub reference_date: NaiveDate,
}

pub type CustomPredicate =
    Arc<dyn Fn(&str, &RowRecord<'_>, &EvaluationContext) -> bool + Send + Sync>;

/// A compiled predicate over one field value and its row.
#[derive(Clone)]
pub enum Check {
    Required,
    Email,
    OneOf(Vec<String>),
    Pattern(Regex),
    Date { format: String },
    /// ISO date no older than `n` days before the reference date (and not in the future).
    MaxAgeDays(i64),
    NumberRange { min: Option<f64>, max: Option<f64> },
    /// The value must not be one of `values` while `other_field` holds one of `other_values`.
    ForbiddenWhen {
        other_field: String,
        other_values: Vec<String>,
        values: Vec<String>,
    },
    Custom(CustomPredicate),
}

impl Check {
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&str, &RowRecord<'_>, &EvaluationContext) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Returns `true` when the value passes.
    pub fn evaluate(&self, value: &str, row: &RowRecord<'_>, ctx: &EvaluationContext) -> bool {
        match self {
            Self::Required => !formats::is_blank(value),
            Self::Email => formats::is_email(value),
            Self::OneOf(allowed) => allowed.iter().any(|a| a == value),
            Self::Pattern(regex) => regex.is_match(value),
            Self::Date { format } => NaiveDate::parse_from_str(value.trim(), format).is_ok(),
            Self::MaxAgeDays(days) => formats::parse_iso_date(value).is_some_and(|date| {
                let age = (ctx.reference_date - date).num_days();
                (0..=*days).contains(&age)
            }),
            Self::NumberRange { min, max } => formats::parse_number(value).is_some_and(|n| {
                min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi)
            }),
            Self::ForbiddenWhen {
                other_field,
                other_values,
                values,
            } => {
                let triggered = row
                    .get(other_field)
                    .is_some_and(|other| other_values.iter().any(|o| o == other));
                !(triggered && values.iter().any(|v| v == value))
            }
            Self::Custom(predicate) => predicate(value, row, ctx),
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Required"),
            Self::Email => write!(f, "Email"),
            Self::OneOf(v) => f.debug_tuple("OneOf").field(v).finish(),
            Self::Pattern(r) => f.debug_tuple("Pattern").field(&r.as_str()).finish(),
            Self::Date { format } => f.debug_struct("Date").field("format", format).finish(),
            Self::MaxAgeDays(d) => f.debug_tuple("MaxAgeDays").field(d).finish(),
            Self::NumberRange { min, max } => f
                .debug_struct("NumberRange")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::ForbiddenWhen {
                other_field,
                other_values,
                values,
            } => f
                .debug_struct("ForbiddenWhen")
                .field("other_field", other_field)
                .field("other_values", other_values)
                .field("values", values)
                .finish(),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

/// Serializable form of a [`Check`], as written in `rules.yml`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum CheckConfig {
    Required,
    Email,
    OneOf {
        values: Vec<String>,
    },
    Pattern {
        regex: String,
    },
    Date {
        #[serde(default = "default_date_format")]
        format: String,
    },
    MaxAgeDays {
        days: i64,
    },
    NumberRange {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    ForbiddenWhen {
        other_field: String,
        other_values: Vec<String>,
        values: Vec<String>,
    },
}

fn default_date_format() -> String {
    ISO_DATE_FORMAT.to_string()
}

impl CheckConfig {
    pub fn compile(&self, field: &str) -> Result<Check, DomainError> {
        let invalid = |reason: String| DomainError::InvalidRule {
            field: field.to_string(),
            reason,
        };

        Ok(match self {
            Self::Required => Check::Required,
            Self::Email => Check::Email,
            Self::OneOf { values } => {
                if values.is_empty() {
                    return Err(invalid("one_of needs at least one value".to_string()));
                }
                Check::OneOf(values.clone())
            }
            Self::Pattern { regex } => Check::Pattern(
                Regex::new(regex).map_err(|e| invalid(format!("invalid regex: {}", e)))?,
            ),
            Self::Date { format } => Check::Date {
                format: format.clone(),
            },
            Self::MaxAgeDays { days } => {
                if *days < 0 {
                    return Err(invalid(format!("max_age_days must be >= 0, got {}", days)));
                }
                Check::MaxAgeDays(*days)
            }
            Self::NumberRange { min, max } => {
                if let (Some(lo), Some(hi)) = (min, max)
                    && lo > hi
                {
                    return Err(invalid(format!("min {} is greater than max {}", lo, hi)));
                }
                Check::NumberRange {
                    min: *min,
                    max: *max,
                }
            }
            Self::ForbiddenWhen {
                other_field,
                other_values,
                values,
            } => Check::ForbiddenWhen {
                other_field: other_field.clone(),
                other_values: other_values.clone(),
                values: values.clone(),
            },
        })
    }
}
