// workbench/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use miette::Diagnostic;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, IntegrationsAction, SourcesAction};
use commands::resolve::ResolveArgs;
use workbench_core::WorkbenchError;
use workbench_core::infrastructure::config::DiscoverOptions;

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG=debug workbench validate ... to see the details.
    // Logs go to stderr so `--format json` stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("❌ {:#}", err);
            if let Some(diag) = err.downcast_ref::<WorkbenchError>() {
                if let Some(code) = diag.code() {
                    eprintln!("   [{}]", code);
                }
                if let Some(help) = diag.help() {
                    eprintln!("   help: {}", help);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Validate {
            dataset,
            indicator,
            format,
            project_dir,
        } => commands::validate::execute(dataset, indicator, format, project_dir),

        Commands::Quality {
            dataset,
            format,
            project_dir,
        } => {
            commands::quality::execute(dataset, format, project_dir)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Resolve {
            dataset,
            row,
            edits,
            indicator,
            out,
            project_dir,
        } => {
            commands::resolve::execute(ResolveArgs {
                dataset,
                row,
                edits,
                indicator,
                out,
                project_dir,
            })?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Export {
            dataset,
            indicator,
            out,
            force,
            project_dir,
        } => {
            commands::export::execute(dataset, indicator, out, force, project_dir)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Sources { action } => match action {
            SourcesAction::Discover {
                project_dir,
                data_dir,
                owner,
                indicator,
                prune,
            } => {
                let options = DiscoverOptions {
                    default_owner: owner,
                    default_indicator: indicator,
                    prune,
                };
                commands::sources::discover(project_dir, data_dir, options)?;
                Ok(ExitCode::SUCCESS)
            }
            SourcesAction::Sync {
                names,
                format,
                project_dir,
            } => commands::sources::sync(names, format, project_dir).await,
        },

        Commands::Integrations { action } => match action {
            IntegrationsAction::Check { project_dir } => commands::integrations::check(project_dir),
        },
    }
}
