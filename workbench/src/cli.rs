// workbench/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "workbench")]
#[command(about = "Compliance review workbench for tabular exports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ✅ Validates a CSV against the rule set of an indicator
    Validate {
        /// CSV file to review
        dataset: PathBuf,

        /// Indicator (or rule set) id. Falls back to the built-in access review rules.
        #[arg(long, short)]
        indicator: Option<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        #[arg(long, default_value = ".", env = "WORKBENCH_PROJECT_DIR")]
        project_dir: PathBuf,
    },

    /// 📊 Computes completeness, uniqueness and format validity per column
    Quality {
        dataset: PathBuf,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        #[arg(long, default_value = ".", env = "WORKBENCH_PROJECT_DIR")]
        project_dir: PathBuf,
    },

    /// 🩹 Edits one row, re-validates and writes the dataset back
    Resolve {
        dataset: PathBuf,

        /// 1-based row number, as shown by `validate`
        #[arg(long)]
        row: usize,

        /// Column edit, repeatable (ex: --set employee_email=jane@corp.com)
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        edits: Vec<(String, String)>,

        #[arg(long, short)]
        indicator: Option<String>,

        /// Write here instead of overwriting the input
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long, default_value = ".", env = "WORKBENCH_PROJECT_DIR")]
        project_dir: PathBuf,
    },

    /// 📤 Exports the reviewed dataset once every row is compliant
    Export {
        dataset: PathBuf,

        #[arg(long, short)]
        indicator: Option<String>,

        /// Output file (default: <target-path>/<name>_reviewed.csv)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Export even if violations remain
        #[arg(long, default_value = "false")]
        force: bool,

        #[arg(long, default_value = ".", env = "WORKBENCH_PROJECT_DIR")]
        project_dir: PathBuf,
    },

    /// 🗂️ Manages the registered data sources (sources.yaml)
    Sources {
        #[command(subcommand)]
        action: SourcesAction,
    },

    /// 🔌 Works with the configured integrations
    Integrations {
        #[command(subcommand)]
        action: IntegrationsAction,
    },
}

#[derive(Subcommand)]
pub enum SourcesAction {
    /// 🕵️ Scans the data directory and updates sources.yaml
    Discover {
        #[arg(long, default_value = ".", env = "WORKBENCH_PROJECT_DIR")]
        project_dir: PathBuf,

        /// Data directory relative to the project (default: data-path from workbench.yaml)
        #[arg(long)]
        data_dir: Option<String>,

        /// Default owner for new sources
        #[arg(long)]
        owner: Option<String>,

        /// Default indicator for new sources
        #[arg(long)]
        indicator: Option<String>,

        /// Remove sources whose file no longer exists
        #[arg(long, default_value = "false")]
        prune: bool,
    },

    /// 🔄 Fetches and validates registered sources
    Sync {
        /// Sources to sync (default: all)
        names: Vec<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        #[arg(long, default_value = ".", env = "WORKBENCH_PROJECT_DIR")]
        project_dir: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum IntegrationsAction {
    /// Checks that every integration is complete. Nothing is contacted.
    Check {
        #[arg(long, default_value = ".", env = "WORKBENCH_PROJECT_DIR")]
        project_dir: PathBuf,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected COLUMN=VALUE, got '{}'", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_validate_defaults() -> Result<()> {
        let args = Cli::try_parse_from(["workbench", "validate", "access.csv"])?;
        match args.command {
            Commands::Validate {
                dataset,
                indicator,
                format,
                ..
            } => {
                assert_eq!(dataset.to_string_lossy(), "access.csv");
                assert_eq!(indicator, None);
                assert_eq!(format, OutputFormat::Table);
                Ok(())
            }
            _ => bail!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_parse_resolve_edits() -> Result<()> {
        let args = Cli::try_parse_from([
            "workbench",
            "resolve",
            "access.csv",
            "--row",
            "3",
            "--set",
            "status=Active",
            "--set",
            "note=a=b",
        ])?;
        match args.command {
            Commands::Resolve { row, edits, .. } => {
                assert_eq!(row, 3);
                assert_eq!(
                    edits,
                    vec![
                        ("status".to_string(), "Active".to_string()),
                        ("note".to_string(), "a=b".to_string())
                    ]
                );
                Ok(())
            }
            _ => bail!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_assignment() {
        let res = Cli::try_parse_from([
            "workbench", "resolve", "a.csv", "--row", "1", "--set", "novalue",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_cli_parse_sources_discover() -> Result<()> {
        let args = Cli::try_parse_from(["workbench", "sources", "discover", "--prune"])?;
        match args.command {
            Commands::Sources {
                action: SourcesAction::Discover { prune, data_dir, .. },
            } => {
                assert!(prune);
                assert_eq!(data_dir, None);
                Ok(())
            }
            _ => bail!("Expected Sources Discover command"),
        }
    }

    #[test]
    fn test_cli_parse_export_force() -> Result<()> {
        let args = Cli::try_parse_from([
            "workbench", "export", "a.csv", "--force", "--out", "/tmp/x.csv",
        ])?;
        match args.command {
            Commands::Export { force, out, .. } => {
                assert!(force);
                assert_eq!(out, Some(PathBuf::from("/tmp/x.csv")));
                Ok(())
            }
            _ => bail!("Expected Export command"),
        }
    }
}
