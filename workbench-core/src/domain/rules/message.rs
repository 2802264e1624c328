// workbench-core/src/domain/rules/message.rs

use regex::{Captures, Regex};
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::domain::dataset::RowRecord;

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(value|field|row\.[^{}]+)\}").expect("placeholder pattern is a valid regex")
});

/// Everything a message can mention: the failing field, its value, and the full row.
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    pub field: &'a str,
    pub value: &'a str,
    pub row: &'a RowRecord<'a>,
}

pub type MessageFn = Arc<dyn Fn(&MessageContext<'_>) -> String + Send + Sync>;

#[derive(Clone)]
pub enum RuleMessage {
    Static(String),
    Dynamic(MessageFn),
}

impl RuleMessage {
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&MessageContext<'_>) -> String + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    /// Builds a message from a config template.
    ///
    /// `{value}`, `{field}` and `{row.<column>}` are substituted at render time;
    /// a template without placeholders stays static.
    pub fn from_template(template: impl Into<String>) -> Self {
        let template = template.into();
        if !PLACEHOLDER.is_match(&template) {
            return Self::Static(template);
        }
        Self::dynamic(move |ctx| render_template(&template, ctx))
    }

    pub fn render(&self, ctx: &MessageContext<'_>) -> String {
        match self {
            Self::Static(s) => s.clone(),
            Self::Dynamic(f) => f(ctx),
        }
    }
}

impl fmt::Debug for RuleMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(s) => f.debug_tuple("Static").field(s).finish(),
            Self::Dynamic(_) => write!(f, "Dynamic(<fn>)"),
        }
    }
}

impl From<&str> for RuleMessage {
    fn from(s: &str) -> Self {
        Self::Static(s.to_string())
    }
}

fn render_template(template: &str, ctx: &MessageContext<'_>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "value" => ctx.value.to_string(),
            "field" => ctx.field.to_string(),
            other => {
                let column = other.trim_start_matches("row.");
                ctx.row.get(column).unwrap_or_default().to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::Dataset;

    #[test]
    fn test_template_substitution() {
        let ds = Dataset::new(
            vec!["access_level".into(), "status".into()],
            vec![vec!["Admin".into(), "Inactive".into()]],
        )
        .unwrap();
        let row = ds.record(1).unwrap();
        let ctx = MessageContext {
            field: "access_level",
            value: "Admin",
            row: &row,
        };

        let msg =
            RuleMessage::from_template("{field}='{value}' on {row.status} account {row.nope}");
        assert!(matches!(msg, RuleMessage::Dynamic(_)));
        assert_eq!(msg.render(&ctx), "access_level='Admin' on Inactive account ");
    }

    #[test]
    fn test_plain_template_is_static() {
        let msg = RuleMessage::from_template("Status is required");
        assert!(matches!(msg, RuleMessage::Static(ref s) if s == "Status is required"));
    }
}
