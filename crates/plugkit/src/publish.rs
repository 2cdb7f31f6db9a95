// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugkit publish` command implementation.
//!
//! Builds one publish task per (publication, repository) pair and runs them.
//! Every task runs even if another fails; the command fails if any did.

use plugkit_config::BuildProperties;
use plugkit_core::{PlugkitError, Project};
use plugkit_publish::{PublicationConfigurator, PublishReport, repository, run_tasks};

use crate::context::BuildContext;

/// Run `plugkit publish`, returning the failures of individual tasks.
///
/// `Err` is reserved for failures before any task starts, such as an
/// unknown repository name or missing credentials.
pub async fn run_publish(
    ctx: &BuildContext,
    only: Option<&str>,
    use_color: bool,
) -> Result<Vec<PlugkitError>, PlugkitError> {
    let properties = BuildProperties::load(&ctx.project_dir)
        .map_err(|e| PlugkitError::Configuration(e.to_string()))?;
    let repositories = repository::from_config(&ctx.config.repositories, &properties, only)?;
    if repositories.is_empty() {
        return Err(PlugkitError::Configuration(
            "no repositories configured; add a [[repositories]] entry".to_string(),
        ));
    }

    let mut project = Project::new(&ctx.config.project.name);
    let tasks = PublicationConfigurator::configure(&mut project, &ctx.publications(), &repositories)?;

    let mut failures = Vec::new();
    for result in run_tasks(&tasks).await {
        match result {
            Ok(report) => print_report(&report, use_color),
            Err(e) => failures.push(e),
        }
    }
    Ok(failures)
}

fn print_report(report: &PublishReport, use_color: bool) {
    let summary = format!(
        "{} ({} files, {} bytes to {})",
        report.task,
        report.files.len(),
        report.bytes,
        report.location
    );
    if use_color {
        use colored::Colorize;
        println!("{} {summary}", "✓".green());
    } else {
        println!("[OK] {summary}");
    }
}
