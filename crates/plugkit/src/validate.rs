// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugkit validate` command implementation.

use plugkit_core::PlugkitError;

use crate::context::BuildContext;

/// Run `plugkit validate`.
///
/// The descriptor has already been loaded and declared by the time this
/// runs; with `check_entry_points` every plugin is also applied against the
/// compiled output.
pub fn run_validate(ctx: &BuildContext, check_entry_points: bool, use_color: bool) -> Result<(), PlugkitError> {
    let applied = if check_entry_points {
        Some(ctx.apply_plugins()?)
    } else {
        None
    };

    println!();
    println!("  plugkit validate");
    println!("  {}", "-".repeat(40));
    line(use_color, &format!("descriptor {}", ctx.descriptor_label()));
    line(
        use_color,
        &format!(
            "{} plugin(s), {} dependency declaration(s), {} repository target(s)",
            ctx.registry.len(),
            ctx.dependencies.len(),
            ctx.config.repositories.len()
        ),
    );
    if let Some(project) = applied {
        line(
            use_color,
            &format!(
                "{} entry point(s) resolved in {}",
                project.applied_plugins().len(),
                ctx.compiled_output().display()
            ),
        );
    }
    println!();
    Ok(())
}

fn line(use_color: bool, message: &str) {
    if use_color {
        use colored::Colorize;
        println!("    {} {message}", "✓".green());
    } else {
        println!("    [OK] {message}");
    }
}
