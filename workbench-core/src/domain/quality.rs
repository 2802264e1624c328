// workbench-core/src/domain/quality.rs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

use crate::domain::dataset::Dataset;
use crate::domain::formats;
use crate::domain::report::percentage;

/// Expected shape of a column's values, used for format validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    Email,
    Date,
    Numeric,
    Text,
}

impl FieldFormat {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Email => formats::is_email(value),
            Self::Date => formats::parse_iso_date(value).is_some(),
            Self::Numeric => formats::parse_number(value).is_some(),
            Self::Text => true,
        }
    }

    /// Guesses a format from the column name.
    pub fn infer(column: &str) -> Option<Self> {
        let name = column.to_lowercase();
        if name.contains("email") {
            Some(Self::Email)
        } else if name.contains("date") {
            Some(Self::Date)
        } else if name.ends_with("_days")
            || name.contains("count")
            || name.contains("amount")
            || name.contains("score")
        {
            Some(Self::Numeric)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Date => "date",
            Self::Numeric => "numeric",
            Self::Text => "text",
        }
    }
}

impl FromStr for FieldFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "date" => Ok(Self::Date),
            "numeric" | "number" => Ok(Self::Numeric),
            "text" | "string" => Ok(Self::Text),
            _ => Err(format!("Unknown field format: {}", s)),
        }
    }
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Column name -> expected format.
pub type SchemaBindings = BTreeMap<String, FieldFormat>;

/// Name-based inference for every header, overridden by explicit bindings.
pub fn resolve_bindings(headers: &[String], explicit: &SchemaBindings) -> SchemaBindings {
    headers
        .iter()
        .filter_map(|h| {
            explicit
                .get(h)
                .copied()
                .or_else(|| FieldFormat::infer(h))
                .map(|f| (h.clone(), f))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnQuality {
    pub completeness: f64,
    pub uniqueness: f64,
    /// `None` when the column has no schema binding.
    pub format_validity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub column: String,
    pub format: Option<FieldFormat>,
    #[serde(flatten)]
    pub quality: ColumnQuality,
}

/// Per-column metrics, in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ColumnQualityReport {
    pub columns: Vec<ColumnProfile>,
}

impl ColumnQualityReport {
    pub fn get(&self, column: &str) -> Option<&ColumnQuality> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| &c.quality)
    }
}

#[instrument(skip_all, fields(rows = dataset.len(), columns = dataset.headers().len()))]
pub fn compute_column_quality(dataset: &Dataset, bindings: &SchemaBindings) -> ColumnQualityReport {
    let total = dataset.len();

    let columns = dataset
        .headers()
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let format = bindings.get(header).copied();

            let mut filled = 0usize;
            let mut valid = 0usize;
            let mut distinct: HashSet<&str> = HashSet::new();

            for value in dataset.column_values(idx) {
                if !formats::is_blank(value) {
                    filled += 1;
                }
                if format.is_some_and(|f| f.matches(value)) {
                    valid += 1;
                }
                distinct.insert(value);
            }

            ColumnProfile {
                column: header.clone(),
                format,
                quality: ColumnQuality {
                    completeness: percentage(filled, total),
                    uniqueness: percentage(distinct.len(), total),
                    format_validity: format.map(|_| percentage(valid, total)),
                },
            }
        })
        .collect();

    ColumnQualityReport { columns }
}
