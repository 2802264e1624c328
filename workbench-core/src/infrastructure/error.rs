// workbench-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(workbench::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CSV ---
    #[error("CSV Error: {0}")]
    #[diagnostic(
        code(workbench::infra::csv),
        help("The file must be UTF-8, comma separated, with a header row.")
    )]
    Csv(#[from] csv::Error),

    #[error("Encoding Error: {0}")]
    #[diagnostic(code(workbench::infra::encoding))]
    Encoding(#[from] std::string::FromUtf8Error),

    // --- CONFIG / YAML / JSON ---
    #[error("YAML Parsing Error in {path}: {source}")]
    #[diagnostic(
        code(workbench::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("JSON Error: {0}")]
    #[diagnostic(code(workbench::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(workbench::infra::config))]
    ConfigError(String),

    #[error("Project configuration not found: {0}")]
    #[diagnostic(
        code(workbench::infra::config_missing),
        help("Create a workbench.yaml at the project root or pass --project-dir.")
    )]
    ConfigNotFound(String),
}

impl InfrastructureError {
    pub fn yaml(path: impl AsRef<std::path::Path>, source: serde_yaml::Error) -> Self {
        Self::YamlError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
