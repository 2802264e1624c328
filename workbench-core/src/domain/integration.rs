// workbench-core/src/domain/integration.rs

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationKind {
    Api,
    Sftp,
}

impl IntegrationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Sftp => "sftp",
        }
    }
}

/// Credentials and settings for an external system feeding a data source.
///
/// Held in memory only; nothing here talks to the remote system.
#[derive(Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_credentials"))]
pub struct IntegrationConfig {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub kind: IntegrationKind,

    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,

    /// Free-text JSON object with connector specific options.
    #[serde(default)]
    #[validate(custom(function = "validate_json_settings"))]
    pub settings: String,
}

impl IntegrationConfig {
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|errors| DomainError::InvalidIntegration {
                name: if self.name.is_empty() {
                    "<unnamed>".to_string()
                } else {
                    self.name.clone()
                },
                details: describe(&errors),
            })
    }

    pub fn settings_json(&self) -> Option<serde_json::Value> {
        if self.settings.trim().is_empty() {
            return None;
        }
        serde_json::from_str(&self.settings).ok()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

impl fmt::Debug for IntegrationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrationConfig")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("endpoint", &self.endpoint)
            .field("api_key", &redact(&self.api_key))
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("settings", &self.settings)
            .finish()
    }
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

fn validate_credentials(cfg: &IntegrationConfig) -> Result<(), ValidationError> {
    match cfg.kind {
        IntegrationKind::Api => {
            required(&cfg.endpoint, "endpoint is required for API integrations")?;
            required(&cfg.api_key, "api_key is required for API integrations")
        }
        IntegrationKind::Sftp => {
            required(&cfg.host, "host is required for SFTP integrations")?;
            required(&cfg.username, "username is required for SFTP integrations")?;
            required(&cfg.password, "password is required for SFTP integrations")
        }
    }
}

fn validate_json_settings(settings: &str) -> Result<(), ValidationError> {
    if settings.trim().is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<serde_json::Value>(settings) {
        Ok(serde_json::Value::Object(_)) => Ok(()),
        Ok(_) => Err(ValidationError::new("json")
            .with_message(Cow::Borrowed("settings must be a JSON object"))),
        Err(e) => Err(ValidationError::new("json")
            .with_message(Cow::Owned(format!("settings is not valid JSON: {}", e)))),
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("{} is invalid ({})", field, e.code),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn api(settings: &str) -> IntegrationConfig {
        IntegrationConfig {
            name: "hris".into(),
            kind: IntegrationKind::Api,
            endpoint: "https://hris.example.com".into(),
            api_key: "k-123".into(),
            host: String::new(),
            username: String::new(),
            password: String::new(),
            settings: settings.into(),
        }
    }

    #[test]
    fn test_valid_api_integration() {
        assert!(api(r#"{"page_size": 100}"#).check().is_ok());
        assert!(api("").check().is_ok());
        assert_eq!(
            api(r#"{"page_size": 100}"#).settings_json().unwrap()["page_size"],
            100
        );
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = api("{page_size: 100").check().unwrap_err();
        match err {
            DomainError::InvalidIntegration { name, details } => {
                assert_eq!(name, "hris");
                assert!(details.contains("settings is not valid JSON"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(api("[1, 2]").check().is_err());
    }

    #[test]
    fn test_sftp_requires_credentials() {
        let cfg: IntegrationConfig =
            serde_yaml::from_str("name: payroll\nkind: sftp\nhost: sftp.example.com").unwrap();
        let err = cfg.check().unwrap_err();
        assert!(err.to_string().contains("username is required"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", api(""));
        assert!(!rendered.contains("k-123"));
        assert!(rendered.contains("***"));
    }
}
