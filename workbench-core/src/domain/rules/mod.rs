// workbench-core/src/domain/rules/mod.rs

pub mod check;
pub mod message;
pub mod rule_set;

// Re-exports
pub use check::{Check, CheckConfig, CustomPredicate, EvaluationContext};
pub use message::{MessageContext, MessageFn, RuleMessage};
pub use rule_set::{
    DEFAULT_RULE_SET, FieldRule, FieldRuleConfig, RuleCatalog, RuleSet, RuleSetConfig,
};
