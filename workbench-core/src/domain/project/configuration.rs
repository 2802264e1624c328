// workbench-core/src/domain/project/configuration.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use crate::domain::indicator::Indicator;
use crate::domain::integration::IntegrationConfig;
use crate::domain::quality::{SchemaBindings, resolve_bindings};
use crate::domain::rules::{RuleCatalog, RuleSetConfig};
use crate::domain::validation::{DEFAULT_IDENTIFIER_COLUMN, ValidationOptions};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(rename = "config-paths", default = "default_config_paths")]
    pub config_paths: Vec<String>,

    #[serde(rename = "data-path", default = "default_data_path")]
    pub data_path: String,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    /// Column checked for duplicates. `null` disables the check.
    #[serde(rename = "identifier-column", default = "default_identifier_column")]
    pub identifier_column: Option<String>,

    /// Pins "today" for age-based rules. Defaults to the current date.
    #[serde(rename = "reference-date", default)]
    pub reference_date: Option<NaiveDate>,

    /// Explicit column formats, on top of name-based inference.
    #[serde(default)]
    pub schema: SchemaBindings,

    #[serde(default)]
    pub indicators: Vec<Indicator>,

    #[serde(rename = "rule-sets", default)]
    pub rule_sets: BTreeMap<String, RuleSetConfig>,

    #[serde(default)]
    pub integrations: Vec<IntegrationConfig>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "workbench".to_string(),
            version: default_version(),
            config_paths: default_config_paths(),
            data_path: default_data_path(),
            target_path: default_target_path(),
            identifier_column: default_identifier_column(),
            reference_date: None,
            schema: SchemaBindings::new(),
            indicators: Vec::new(),
            rule_sets: BTreeMap::new(),
            integrations: Vec::new(),
        }
    }
}

impl ProjectConfig {
    pub fn validation_options(&self) -> ValidationOptions {
        let base = match self.reference_date {
            Some(date) => ValidationOptions::new(date),
            None => ValidationOptions::default(),
        };
        base.with_identifier_column(self.identifier_column.clone())
    }

    pub fn rule_catalog(&self) -> Result<RuleCatalog, DomainError> {
        RuleCatalog::from_configs(&self.rule_sets)
    }

    pub fn schema_bindings(&self, headers: &[String]) -> SchemaBindings {
        resolve_bindings(headers, &self.schema)
    }

    pub fn indicator(&self, id: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.id == id)
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_config_paths() -> Vec<String> {
    vec!["config".to_string()]
}
fn default_data_path() -> String {
    "data".to_string()
}
fn default_target_path() -> String {
    "target".to_string()
}
fn default_identifier_column() -> Option<String> {
    Some(DEFAULT_IDENTIFIER_COLUMN.to_string())
}
