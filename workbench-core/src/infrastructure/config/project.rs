// workbench-core/src/infrastructure/config/project.rs

use chrono::NaiveDate;
use serde::{Deserialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::indicator::Indicator;
use crate::domain::integration::IntegrationConfig;
use crate::domain::project::ProjectConfig;
use crate::domain::rules::RuleSetConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["workbench.yaml", "workbench_project.yaml"];

pub const ENV_TARGET_PATH: &str = "WORKBENCH_TARGET_PATH";
pub const ENV_REFERENCE_DATE: &str = "WORKBENCH_REFERENCE_DATE";

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Main file
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");

    let mut config: ProjectConfig = load_fragment(&config_path)?;

    // 2. Satellite files (rules, indicators, integrations)
    if let Some(config_folder) = config.config_paths.first() {
        let config_dir = project_dir.join(config_folder);
        if config_dir.exists() {
            load_satellite_configs(&mut config, &config_dir)?;
        }
    }

    // 3. Environment overrides
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

/// Like [`load_project_config`], but a directory without a project file yields
/// the built-in defaults so a bare CSV can still be validated.
pub fn load_project_config_or_default(
    project_dir: &Path,
) -> Result<ProjectConfig, InfrastructureError> {
    match load_project_config(project_dir) {
        Err(InfrastructureError::ConfigNotFound(msg)) => {
            warn!(%msg, "No project file, using defaults");
            let mut config = ProjectConfig::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
            Ok(config)
        }
        other => other,
    }
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "no {} in {}",
        CONFIG_CANDIDATES.join(" or "),
        root.display()
    )))
}

/// Loads a typed configuration fragment from a YAML file.
fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| InfrastructureError::yaml(path, e))
}

fn find_satellite(config_dir: &Path, stem: &str) -> Option<PathBuf> {
    ["yml", "yaml"]
        .iter()
        .map(|ext| config_dir.join(format!("{}.{}", stem, ext)))
        .find(|p| p.exists())
}

fn load_satellite_configs(
    config: &mut ProjectConfig,
    config_dir: &Path,
) -> Result<(), InfrastructureError> {
    // A. Rule sets, keyed by indicator id. Merged over the inline ones.
    if let Some(path) = find_satellite(config_dir, "rules") {
        #[derive(Deserialize)]
        struct RulesWrapper {
            #[serde(default)]
            rule_sets: BTreeMap<String, RuleSetConfig>,
        }

        let wrapper: RulesWrapper = load_fragment(&path)?;
        let count = wrapper.rule_sets.len();
        config.rule_sets.extend(wrapper.rule_sets);
        info!(count, "  Rule sets loaded");
    }

    // B. Indicators
    if let Some(path) = find_satellite(config_dir, "indicators") {
        #[derive(Deserialize)]
        struct IndicatorsWrapper {
            #[serde(default)]
            indicators: Vec<Indicator>,
        }

        let wrapper: IndicatorsWrapper = load_fragment(&path)?;
        info!(count = wrapper.indicators.len(), "  Indicators loaded");
        config.indicators.extend(wrapper.indicators);
    }

    // C. Integrations
    if let Some(path) = find_satellite(config_dir, "integrations") {
        #[derive(Deserialize)]
        struct IntegrationsWrapper {
            #[serde(default)]
            integrations: Vec<IntegrationConfig>,
        }

        let wrapper: IntegrationsWrapper = load_fragment(&path)?;
        info!(count = wrapper.integrations.len(), "  Integrations loaded");
        config.integrations.extend(wrapper.integrations);
    }

    Ok(())
}

fn apply_env_overrides(
    config: &mut ProjectConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), InfrastructureError> {
    if let Some(val) = lookup(ENV_TARGET_PATH) {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Some(val) = lookup(ENV_REFERENCE_DATE) {
        let date = NaiveDate::parse_from_str(val.trim(), "%Y-%m-%d").map_err(|e| {
            InfrastructureError::ConfigError(format!(
                "{} must be YYYY-MM-DD, got '{}': {}",
                ENV_REFERENCE_DATE, val, e
            ))
        })?;
        info!(%date, "Overriding reference date via ENV");
        config.reference_date = Some(date);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    #[test]
    fn test_loads_main_file_and_satellites() -> Result<()> {
        let dir = tempdir()?;
        write(
            &dir.path().join("workbench.yaml"),
            "name: q3_review\nreference-date: 2024-06-30\nschema:\n  badge: numeric\n",
        )?;
        write(
            &dir.path().join("config/rules.yml"),
            r#"
rule_sets:
  kri-vendor:
    description: Vendor review
    rules:
      - field: vendor_email
        check: email
        message: "Bad email {value}"
"#,
        )?;
        write(
            &dir.path().join("config/indicators.yaml"),
            "indicators:\n  - id: kri-vendor\n    name: Vendor hygiene\n    threshold: 2\n",
        )?;

        let cfg = load_project_config(dir.path())?;
        assert_eq!(cfg.name, "q3_review");
        assert!(cfg.rule_sets.contains_key("kri-vendor"));
        assert_eq!(cfg.indicators.len(), 1);
        assert_eq!(cfg.indicator("kri-vendor").unwrap().threshold, 2.0);
        assert!(cfg.rule_catalog()?.contains("kri-vendor"));
        Ok(())
    }

    #[test]
    fn test_missing_project_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_project_config(dir.path()),
            Err(InfrastructureError::ConfigNotFound(_))
        ));
        let cfg = load_project_config_or_default(dir.path()).unwrap();
        assert_eq!(cfg.name, "workbench");
    }

    #[test]
    fn test_broken_yaml_names_the_file() -> Result<()> {
        let dir = tempdir()?;
        write(&dir.path().join("workbench.yaml"), "name: [unclosed")?;
        let err = load_project_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("workbench.yaml"));
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let mut cfg = ProjectConfig::default();
        apply_env_overrides(&mut cfg, |key| match key {
            ENV_TARGET_PATH => Some("/tmp/out".to_string()),
            ENV_REFERENCE_DATE => Some("2024-01-31".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.target_path, "/tmp/out");
        assert_eq!(cfg.reference_date, NaiveDate::from_ymd_opt(2024, 1, 31));

        let bad = apply_env_overrides(&mut cfg, |key| {
            (key == ENV_REFERENCE_DATE).then(|| "31/01/2024".to_string())
        });
        assert!(matches!(bad, Err(InfrastructureError::ConfigError(_))));
    }
}
