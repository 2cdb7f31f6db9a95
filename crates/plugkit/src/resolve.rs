// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugkit resolve` command implementation.
//!
//! Prints the compile and runtime classpaths. CompileOnly dependencies
//! appear on the compile classpath only.

use plugkit_core::PlugkitError;
use plugkit_deps::Classpath;

use crate::context::BuildContext;

pub fn run_resolve(ctx: &BuildContext) -> Result<(), PlugkitError> {
    let resolver = ctx.resolver();
    let compile = ctx
        .dependencies
        .compile_classpath(&resolver)
        .map_err(|e| e.in_task("resolveCompileClasspath"))?;
    let runtime = ctx
        .dependencies
        .runtime_classpath(&resolver)
        .map_err(|e| e.in_task("resolveRuntimeClasspath"))?;

    print_classpath("compile", &compile);
    print_classpath("runtime", &runtime);
    Ok(())
}

fn print_classpath(label: &str, classpath: &Classpath) {
    println!("{label} classpath ({} entries):", classpath.len());
    for entry in classpath.entries() {
        println!("  {}", entry.display());
    }
}
