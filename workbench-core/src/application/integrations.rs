// workbench-core/src/application/integrations.rs

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::project::ProjectConfig;

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationCheck {
    pub name: String,
    pub kind: String,
    pub error: Option<String>,
}

impl IntegrationCheck {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Validates every configured integration. Nothing is contacted.
pub fn check_integrations(config: &ProjectConfig) -> Vec<IntegrationCheck> {
    config
        .integrations
        .iter()
        .map(|integration| {
            let error = integration.check().err().map(|e| e.to_string());
            match &error {
                None => info!(integration = %integration.name, "Integration settings valid"),
                Some(msg) => {
                    warn!(integration = %integration.name, %msg, "Integration settings invalid")
                }
            }
            IntegrationCheck {
                name: integration.name.clone(),
                kind: integration.kind.as_str().to_string(),
                error,
            }
        })
        .collect()
}
