// workbench-core/src/domain/rules/rule_set.rs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::check::{Check, CheckConfig, EvaluationContext};
use super::message::{MessageContext, RuleMessage};
use crate::domain::dataset::RowRecord;
use crate::domain::error::DomainError;

pub const DEFAULT_RULE_SET: &str = "user_access_review";

const ACCESS_LEVELS: [&str; 4] = ["Admin", "Manager", "User", "Read-Only"];
const ACCOUNT_STATUSES: [&str; 4] = ["Active", "Inactive", "Suspended", "Terminated"];
const DORMANT_STATUSES: [&str; 3] = ["Inactive", "Suspended", "Terminated"];
const PRIVILEGED_LEVELS: [&str; 2] = ["Admin", "Manager"];
const MAX_DORMANT_DAYS: i64 = 90;

#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: String,
    pub check: Check,
    pub message: RuleMessage,
}

impl FieldRule {
    pub fn new(field: impl Into<String>, check: Check, message: impl Into<RuleMessage>) -> Self {
        Self {
            field: field.into(),
            check,
            message: message.into(),
        }
    }

    /// Returns the rendered message when the rule fails, `None` when it passes
    /// or when the row has no such field.
    pub fn evaluate(&self, row: &RowRecord<'_>, ctx: &EvaluationContext) -> Option<String> {
        let value = row.get(&self.field)?;
        if self.check.evaluate(value, row, ctx) {
            return None;
        }
        let message = self.message.render(&MessageContext {
            field: &self.field,
            value,
            row,
        });
        debug!(field = %self.field, value, %message, "Rule failed");
        Some(message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub description: String,
    pub rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Built-in user-access review, used when an indicator has no rule set of its own.
    pub fn user_access_review() -> Self {
        let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            description: "User access review: identity, entitlement and dormancy checks"
                .to_string(),
            rules: vec![
                FieldRule::new(
                    "employee_email",
                    Check::Email,
                    RuleMessage::dynamic(|ctx| {
                        format!("Invalid or missing email format: '{}'", ctx.value)
                    }),
                ),
                FieldRule::new(
                    "access_level",
                    Check::OneOf(list(&ACCESS_LEVELS)),
                    RuleMessage::dynamic(|ctx| {
                        format!(
                            "Unrecognised access level '{}' (expected one of {})",
                            ctx.value,
                            ACCESS_LEVELS.join(", ")
                        )
                    }),
                ),
                FieldRule::new(
                    "access_level",
                    Check::ForbiddenWhen {
                        other_field: "status".to_string(),
                        other_values: list(&DORMANT_STATUSES),
                        values: list(&PRIVILEGED_LEVELS),
                    },
                    RuleMessage::dynamic(|ctx| {
                        format!(
                            "Privileged access '{}' retained by {} account",
                            ctx.value,
                            ctx.row.get("status").unwrap_or_default()
                        )
                    }),
                ),
                FieldRule::new(
                    "status",
                    Check::OneOf(list(&ACCOUNT_STATUSES)),
                    RuleMessage::dynamic(|ctx| format!("Unknown account status '{}'", ctx.value)),
                ),
                FieldRule::new(
                    "last_login_date",
                    Check::MaxAgeDays(MAX_DORMANT_DAYS),
                    RuleMessage::dynamic(|ctx| {
                        format!(
                            "Last login '{}' is not a YYYY-MM-DD date within the last {} days",
                            ctx.value, MAX_DORMANT_DAYS
                        )
                    }),
                ),
                FieldRule::new(
                    "last_activity_days",
                    Check::NumberRange {
                        min: Some(0.0),
                        max: Some(MAX_DORMANT_DAYS as f64),
                    },
                    RuleMessage::dynamic(|ctx| {
                        format!(
                            "No activity for '{}' days (limit {})",
                            ctx.value, MAX_DORMANT_DAYS
                        )
                    }),
                ),
            ],
        }
    }
}

// --- CONFIGURATION (rules.yml) ---

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldRuleConfig {
    pub field: String,
    #[serde(flatten)]
    pub check: CheckConfig,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RuleSetConfig {
    #[serde(default)]
    pub description: Option<String>,
    // Kept optional so that a missing array surfaces as a domain error, not a parse error.
    #[serde(default)]
    pub rules: Option<Vec<FieldRuleConfig>>,
}

impl RuleSetConfig {
    pub fn compile(&self, id: &str) -> Result<RuleSet, DomainError> {
        let rules = self
            .rules
            .as_ref()
            .ok_or_else(|| DomainError::MissingRules(id.to_string()))?;

        let compiled = rules
            .iter()
            .map(|r| {
                Ok(FieldRule::new(
                    r.field.clone(),
                    r.check.compile(&r.field)?,
                    RuleMessage::from_template(r.message.clone()),
                ))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(RuleSet {
            description: self.description.clone().unwrap_or_else(|| id.to_string()),
            rules: compiled,
        })
    }
}

/// Rule sets keyed by indicator id, with the built-in set as fallback.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    sets: HashMap<String, RuleSet>,
    fallback: RuleSet,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self {
            sets: HashMap::new(),
            fallback: RuleSet::user_access_review(),
        }
    }
}

impl RuleCatalog {
    pub fn from_configs(configs: &BTreeMap<String, RuleSetConfig>) -> Result<Self, DomainError> {
        let mut catalog = Self::default();
        for (id, cfg) in configs {
            catalog.sets.insert(id.clone(), cfg.compile(id)?);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, id: impl Into<String>, rule_set: RuleSet) {
        self.sets.insert(id.into(), rule_set);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sets.contains_key(id)
    }

    pub fn resolve(&self, id: Option<&str>) -> &RuleSet {
        match id.and_then(|id| self.sets.get(id)) {
            Some(set) => set,
            None => {
                debug!(requested = ?id, "Falling back to default rule set");
                &self.fallback
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::Dataset;
    use chrono::NaiveDate;

    #[test]
    fn test_missing_rules_array_is_blocking() -> anyhow::Result<()> {
        let yaml = "description: Vendor review";
        let cfg: RuleSetConfig = serde_yaml::from_str(yaml)?;
        assert_eq!(
            cfg.compile("vendor").unwrap_err(),
            DomainError::MissingRules("vendor".into())
        );
        Ok(())
    }

    #[test]
    fn test_compile_from_yaml() -> anyhow::Result<()> {
        let yaml = r#"
description: Vendor review
rules:
  - field: vendor_email
    check: email
    message: "Bad vendor email '{value}'"
  - field: risk_score
    check: number_range
    min: 0
    max: 5
    message: Risk score out of range
"#;
        let cfg: RuleSetConfig = serde_yaml::from_str(yaml)?;
        let set = cfg.compile("vendor")?;
        assert_eq!(set.description, "Vendor review");
        assert_eq!(set.rules.len(), 2);
        assert!(matches!(
            set.rules[1].check,
            Check::NumberRange {
                min: Some(_),
                max: Some(_)
            }
        ));

        let ds = Dataset::new(
            vec!["vendor_email".into()],
            vec![vec!["nope".into()]],
        )?;
        let ctx = EvaluationContext {
            reference_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let msg = set.rules[0].evaluate(&ds.record(1).unwrap(), &ctx);
        assert_eq!(msg.as_deref(), Some("Bad vendor email 'nope'"));
        // Field absent from the row: skipped, not failed.
        assert_eq!(set.rules[1].evaluate(&ds.record(1).unwrap(), &ctx), None);
        Ok(())
    }

    #[test]
    fn test_catalog_fallback() -> anyhow::Result<()> {
        let mut configs = BTreeMap::new();
        configs.insert(
            "kri-7".to_string(),
            RuleSetConfig {
                description: Some("Seven".into()),
                rules: Some(vec![]),
            },
        );
        let catalog = RuleCatalog::from_configs(&configs)?;
        assert_eq!(catalog.resolve(Some("kri-7")).description, "Seven");
        assert_eq!(
            catalog.resolve(Some("unknown")).description,
            RuleSet::user_access_review().description
        );
        assert_eq!(
            catalog.resolve(None).rules.len(),
            RuleSet::user_access_review().rules.len()
        );
        Ok(())
    }
}
