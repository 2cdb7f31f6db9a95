// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! plugkit - declare, package, and publish build plugins.
//!
//! This is the binary entry point for the plugkit CLI.

mod context;
mod package;
mod plugins;
mod publish;
mod resolve;
mod validate;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use plugkit_config::PlugkitConfig;
use plugkit_core::PlugkitError;

use crate::context::BuildContext;

/// plugkit - declare, package, and publish build plugins.
#[derive(Parser, Debug)]
#[command(name = "plugkit", version, about, long_about = None)]
struct Cli {
    /// Load this descriptor instead of the layered `plugkit.toml` lookup.
    #[arg(long, global = true, value_name = "PATH")]
    descriptor: Option<PathBuf>,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and validate the descriptor.
    Validate {
        /// Also resolve every plugin entry point against the compiled output.
        #[arg(long)]
        check_entry_points: bool,
    },
    /// List declared plugins.
    Plugins {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Resolve and print the compile and runtime classpaths.
    Resolve,
    /// Build the archive without publishing it.
    Package,
    /// Publish to every configured repository.
    Publish {
        /// Publish only to the named repository.
        #[arg(long, value_name = "NAME")]
        repository: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.descriptor {
        Some(path) => plugkit_config::load_and_validate_path(path),
        None => plugkit_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            plugkit_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.project.log_level.clone()
    };
    init_tracing(&log_level);

    let use_color = !cli.plain && std::io::stdout().is_terminal();
    let failures = match run(cli, config, use_color).await {
        Ok(failures) => failures,
        Err(e) => vec![e],
    };
    if !failures.is_empty() {
        for failure in &failures {
            eprintln!("{}", format_failure(failure, use_color));
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: PlugkitConfig, use_color: bool) -> Result<Vec<PlugkitError>, PlugkitError> {
    let (project_dir, label) = project_location(cli.descriptor.as_deref())?;
    let ctx = BuildContext::assemble(config, project_dir, label)?;

    match cli.command {
        Commands::Validate { check_entry_points } => {
            validate::run_validate(&ctx, check_entry_points, use_color)?
        }
        Commands::Plugins { json } => plugins::run_plugins(&ctx, json)?,
        Commands::Resolve => resolve::run_resolve(&ctx)?,
        Commands::Package => package::run_package(&ctx)?,
        Commands::Publish { repository } => {
            return publish::run_publish(&ctx, repository.as_deref(), use_color).await;
        }
    }
    Ok(Vec::new())
}

/// Project directory and a label naming where the descriptor came from.
fn project_location(descriptor: Option<&Path>) -> Result<(PathBuf, String), PlugkitError> {
    match descriptor {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            Ok((dir, path.display().to_string()))
        }
        None => {
            let dir = std::env::current_dir().map_err(|e| PlugkitError::io(".", e))?;
            Ok((dir, plugkit_config::loader::DESCRIPTOR_FILE.to_string()))
        }
    }
}

/// `error: <task>: <cause>` for task failures, `error: <cause>` otherwise.
fn format_failure(error: &PlugkitError, use_color: bool) -> String {
    let prefix = if use_color {
        use colored::Colorize;
        "error".red().bold().to_string()
    } else {
        "error".to_string()
    };
    match error.task() {
        Some(task) => format!("{prefix}: {task}: {}", error.root()),
        None => format!("{prefix}: {error}"),
    }
}

/// Initialize the tracing subscriber with an env filter.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plugkit={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_publish_with_repository() {
        let cli = Cli::parse_from(["plugkit", "publish", "--repository", "github", "--descriptor", "x/plugkit.toml"]);
        assert_eq!(cli.descriptor, Some(PathBuf::from("x/plugkit.toml")));
        assert!(matches!(cli.command, Commands::Publish { repository: Some(ref r) } if r == "github"));
    }

    #[test]
    fn descriptor_directory_is_project_directory() {
        let (dir, label) = project_location(Some(Path::new("/work/weaver/plugkit.toml"))).unwrap();
        assert_eq!(dir, PathBuf::from("/work/weaver"));
        assert_eq!(label, "/work/weaver/plugkit.toml");

        let (dir, _) = project_location(Some(Path::new("plugkit.toml"))).unwrap();
        assert_eq!(dir, PathBuf::from("."));
    }

    #[test]
    fn task_failures_name_the_task() {
        let err = PlugkitError::PublicationConfig("publication `main`: version must not be empty".into())
            .in_task("publishMainPublicationToLocalRepository");
        let rendered = format_failure(&err, false);
        assert_eq!(
            rendered,
            "error: publishMainPublicationToLocalRepository: publication configuration error: publication `main`: version must not be empty"
        );
        assert_eq!(
            format_failure(&PlugkitError::Internal("boom".into()), false),
            "error: internal error: boom"
        );
    }
}
