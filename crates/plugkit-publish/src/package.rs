// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Archive packaging.
//!
//! The compiled output and bundled descriptors are written into a gzipped
//! tarball. Entries are sorted and carry zeroed timestamps and owners, so
//! packaging the same input twice yields identical bytes.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use plugkit_core::PlugkitError;
use tracing::{debug, info};

use crate::descriptor::{BundledFile, Component, PublicationDescriptor};

/// Package the archive of `publication`.
///
/// Marker publications have no archive and return `Ok(None)`.
pub fn package(publication: &PublicationDescriptor) -> Result<Option<Vec<u8>>, PlugkitError> {
    match &publication.component {
        Component::Archive { source, bundled, .. } => package_archive(source, bundled).map(Some),
        Component::Marker { .. } => Ok(None),
    }
}

/// Package `source` (a directory or a single file) plus `bundled` into a `tar.gz`.
pub fn package_archive(source: &Path, bundled: &[BundledFile]) -> Result<Vec<u8>, PlugkitError> {
    let mut entries: Vec<(String, Vec<u8>)> = Vec::new();

    if source.is_dir() {
        let mut files = Vec::new();
        collect_files(source, &mut files)?;
        for file in files {
            let relative = archive_path(source, &file)?;
            let data = std::fs::read(&file).map_err(|e| PlugkitError::io(&file, e))?;
            entries.push((relative, data));
        }
    } else if source.is_file() {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| PlugkitError::Internal(format!("no file name: {}", source.display())))?;
        let data = std::fs::read(source).map_err(|e| PlugkitError::io(source, e))?;
        entries.push((name, data));
    } else {
        return Err(PlugkitError::PublicationConfig(format!(
            "publication source `{}` does not exist; build the project first",
            source.display()
        )));
    }

    for file in bundled {
        entries.retain(|(path, _)| *path != file.path);
        entries.push((file.path.clone(), file.content.clone()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, data) in &entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(0);
        header.set_uid(0);
        header.set_gid(0);
        builder
            .append_data(&mut header, path, data.as_slice())
            .map_err(|e| PlugkitError::io(path, e))?;
        debug!(entry = %path, bytes = data.len(), "packaged entry");
    }

    let encoder = builder
        .into_inner()
        .map_err(|e| PlugkitError::io(source, e))?;
    let bytes = encoder.finish().map_err(|e| PlugkitError::io(source, e))?;
    Ok(bytes)
}

/// Package `publication` into `out_dir` as `<artifact>-<version>.tar.gz`.
///
/// Returns the path written, or `None` for marker publications.
pub fn package_to_dir(
    publication: &PublicationDescriptor,
    out_dir: &Path,
) -> Result<Option<PathBuf>, PlugkitError> {
    publication.validate()?;
    let Some(bytes) = package(publication)? else {
        return Ok(None);
    };

    std::fs::create_dir_all(out_dir).map_err(|e| PlugkitError::io(out_dir, e))?;
    let coordinate = publication.coordinate();
    let path = out_dir.join(format!(
        "{}-{}.{}",
        coordinate.artifact, coordinate.version, coordinate.extension
    ));
    let mut file = std::fs::File::create(&path).map_err(|e| PlugkitError::io(&path, e))?;
    file.write_all(&bytes).map_err(|e| PlugkitError::io(&path, e))?;

    info!(path = %path.display(), bytes = bytes.len(), "packaged publication");
    Ok(Some(path))
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), PlugkitError> {
    let entries = std::fs::read_dir(dir).map_err(|e| PlugkitError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| PlugkitError::io(dir, e))?.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn archive_path(root: &Path, file: &Path) -> Result<String, PlugkitError> {
    let relative = file
        .strip_prefix(root)
        .map_err(|e| PlugkitError::Internal(format!("{}: {e}", file.display())))?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}
