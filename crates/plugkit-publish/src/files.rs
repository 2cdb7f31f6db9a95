// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The set of files one publication writes to a repository.

use plugkit_core::PlugkitError;
use plugkit_core::layout::{artifact_path, file_path};
use sha2::{Digest, Sha256};

use crate::descriptor::PublicationDescriptor;
use crate::package::package;
use crate::pom::render_pom;

/// A file to write, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedFile {
    pub path: String,
    pub bytes: Vec<u8>,
}

/// Assemble the artifact, its metadata, and a `.sha256` sidecar for each.
///
/// Only reads the filesystem; nothing is written.
pub fn assemble(publication: &PublicationDescriptor) -> Result<Vec<PublishedFile>, PlugkitError> {
    let coordinate = publication.coordinate();
    let mut files = Vec::new();

    if let Some(archive) = package(publication)? {
        files.push(PublishedFile {
            path: artifact_path(&coordinate),
            bytes: archive,
        });
    }
    files.push(PublishedFile {
        path: file_path(&coordinate, "pom"),
        bytes: render_pom(publication).into_bytes(),
    });

    let checksums: Vec<PublishedFile> = files
        .iter()
        .map(|f| PublishedFile {
            path: format!("{}.sha256", f.path),
            bytes: sha256_hex(&f.bytes).into_bytes(),
        })
        .collect();
    files.extend(checksums);

    Ok(files)
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
