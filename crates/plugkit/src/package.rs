// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugkit package` command implementation.

use plugkit_core::PlugkitError;
use plugkit_publish::{package_task_name, package_to_dir};

use crate::context::BuildContext;

/// Package every publication with an archive into `<build_dir>/plugkit`.
pub fn run_package(ctx: &BuildContext) -> Result<(), PlugkitError> {
    let out_dir = ctx.package_dir();
    for publication in ctx.publications() {
        let task = package_task_name(&publication.name);
        if let Some(path) = package_to_dir(&publication, &out_dir).map_err(|e| e.in_task(&task))? {
            println!("{task}: {}", path.display());
        }
    }
    Ok(())
}
