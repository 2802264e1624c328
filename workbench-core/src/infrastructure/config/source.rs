// workbench-core/src/infrastructure/config/source.rs

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::domain::sources::{SourceConfig, SourceList};
use crate::infrastructure::error::InfrastructureError;

pub const SOURCES_FILE: &str = "sources.yaml";
const SUPPORTED_EXTENSIONS: [&str; 1] = ["csv"];

pub struct DiscoverOptions {
    pub default_owner: Option<String>,
    pub default_indicator: Option<String>,
    /// Drop registered sources whose file disappeared.
    pub prune: bool,
}

/// Registered sources from `<project>/sources.yaml`; empty when the file does not exist yet.
pub fn load_sources(project_dir: &Path) -> Result<Vec<SourceConfig>, InfrastructureError> {
    let sources_path = project_dir.join(SOURCES_FILE);
    if !sources_path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&sources_path)?;
    let list: SourceList = serde_yaml::from_str(&content)
        .map_err(|e| InfrastructureError::yaml(&sources_path, e))?;
    Ok(list.sources)
}

pub fn save_sources(
    project_dir: &Path,
    source_list: &SourceList,
) -> Result<(), InfrastructureError> {
    let content = serde_yaml::to_string(source_list)
        .map_err(|e| InfrastructureError::yaml(project_dir.join(SOURCES_FILE), e))?;
    crate::infrastructure::fs::atomic_write(project_dir.join(SOURCES_FILE), content)
}

/// Scans the data directory for CSV files and merges them with the registered sources.
///
/// Known paths keep their existing entry (owner, indicator). New files get a
/// name derived from the file stem, prefixed by the sub-folder when nested.
pub fn discover_sources(
    project_dir: &Path,
    data_dir_rel: &str,
    options: &DiscoverOptions,
) -> Result<SourceList, InfrastructureError> {
    let data_dir = project_dir.join(data_dir_rel);
    if !data_dir.is_dir() {
        return Err(InfrastructureError::ConfigError(format!(
            "data directory {} does not exist",
            data_dir.display()
        )));
    }

    let mut known_paths: HashMap<String, SourceConfig> = load_sources(project_dir)?
        .into_iter()
        .map(|s| (s.path.clone(), s))
        .collect();

    let mut found_files: Vec<PathBuf> = WalkDir::new(&data_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .map(walkdir::DirEntry::into_path)
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
        })
        .collect();
    found_files.sort();

    let mut final_sources = Vec::new();
    let mut seen_names: HashSet<String> = known_paths.values().map(|s| s.name.clone()).collect();

    for path in found_files {
        let rel_path = path
            .strip_prefix(project_dir)
            .map_err(|_| {
                InfrastructureError::ConfigError(format!(
                    "{} is outside the project directory",
                    path.display()
                ))
            })?
            .to_string_lossy()
            .replace('\\', "/");

        if let Some(existing) = known_paths.remove(&rel_path) {
            info!(source = %existing.name, "Kept");
            final_sources.push(existing);
            continue;
        }

        let suggested = derive_stable_name(&path, &data_dir);
        let mut name = suggested.clone();
        let mut i = 1;
        while seen_names.contains(&name) {
            name = format!("{}_{}", suggested, i);
            i += 1;
        }
        seen_names.insert(name.clone());

        info!(path = %rel_path, source = %name, "New source");
        final_sources.push(SourceConfig {
            name,
            path: rel_path,
            owner: options.default_owner.clone(),
            indicator: options.default_indicator.clone(),
        });
    }

    for (missing_path, missing_source) in known_paths {
        if options.prune {
            info!(path = %missing_path, "Pruned (file not found)");
        } else {
            warn!(
                source = %missing_source.name,
                path = %missing_path,
                "Source points to a missing file"
            );
            final_sources.push(missing_source);
        }
    }

    final_sources.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(SourceList {
        sources: final_sources,
    })
}

fn derive_stable_name(path: &Path, base_data_dir: &Path) -> String {
    let stem = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    match path.parent() {
        Some(parent) if parent != base_data_dir => {
            let folder = parent
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            format!("{}_{}", folder, stem)
        }
        _ => stem,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    fn touch(path: &Path) -> Result<()> {
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(path, "a\n1\n")?;
        Ok(())
    }

    fn options(prune: bool) -> DiscoverOptions {
        DiscoverOptions {
            default_owner: Some("grc".into()),
            default_indicator: None,
            prune,
        }
    }

    #[test]
    fn test_discover_names_and_merge() -> Result<()> {
        let dir = tempdir()?;
        touch(&dir.path().join("data/access.csv"))?;
        touch(&dir.path().join("data/hr/access.csv"))?;
        touch(&dir.path().join("data/readme.txt"))?;

        let list = discover_sources(dir.path(), "data", &options(false))?;
        let names: Vec<&str> = list.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["access", "hr_access"]);
        assert_eq!(list.sources[0].owner.as_deref(), Some("grc"));

        // Second pass keeps manual edits.
        let mut edited = list.clone();
        edited.sources[0].owner = Some("iam".into());
        save_sources(dir.path(), &edited)?;

        let again = discover_sources(dir.path(), "data", &options(false))?;
        assert_eq!(again.sources[0].owner.as_deref(), Some("iam"));
        Ok(())
    }

    #[test]
    fn test_prune_missing_files() -> Result<()> {
        let dir = tempdir()?;
        touch(&dir.path().join("data/a.csv"))?;
        save_sources(
            dir.path(),
            &SourceList {
                sources: vec![SourceConfig {
                    name: "gone".into(),
                    path: "data/gone.csv".into(),
                    owner: None,
                    indicator: None,
                }],
            },
        )?;

        let kept = discover_sources(dir.path(), "data", &options(false))?;
        assert_eq!(kept.sources.len(), 2);

        let pruned = discover_sources(dir.path(), "data", &options(true))?;
        assert_eq!(pruned.sources.len(), 1);
        assert_eq!(pruned.sources[0].name, "a");
        Ok(())
    }

    #[test]
    fn test_missing_data_dir() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            discover_sources(dir.path(), "data", &options(false)),
            Err(InfrastructureError::ConfigError(_))
        ));
    }
}
