// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Publish tasks.
//!
//! One task per (publication, repository) pair. A task validates its
//! publication identity before touching any repository, so a missing
//! version never leaves a half-written version directory behind.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use plugkit_core::{ArtifactRepository, Coordinate, PlugkitError, Project};
use tracing::{info, warn};

use crate::descriptor::{Component, PublicationDescriptor};
use crate::files::assemble;

/// Outcome of a successful publish task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub task: String,
    pub repository: String,
    pub location: String,
    /// Repository-relative paths, in write order.
    pub files: Vec<String>,
    pub bytes: u64,
}

/// Publishes one publication to one repository.
#[derive(Clone)]
pub struct PublishTask {
    name: String,
    publication: Arc<PublicationDescriptor>,
    repository: Arc<dyn ArtifactRepository>,
}

impl std::fmt::Debug for PublishTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishTask")
            .field("name", &self.name)
            .field("publication", &self.publication.name)
            .field("repository", &self.repository.name())
            .finish()
    }
}

impl PublishTask {
    pub fn new(
        publication: Arc<PublicationDescriptor>,
        repository: Arc<dyn ArtifactRepository>,
    ) -> Self {
        Self {
            name: task_name(&publication.name, repository.name()),
            publication,
            repository,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn publication(&self) -> &PublicationDescriptor {
        &self.publication
    }

    pub fn repository(&self) -> &dyn ArtifactRepository {
        self.repository.as_ref()
    }

    /// Validate, package, and write every file of the publication.
    ///
    /// Errors are wrapped in `PlugkitError::TaskFailed` naming this task.
    pub async fn execute(&self) -> Result<PublishReport, PlugkitError> {
        self.run().await.map_err(|e| e.in_task(&self.name))
    }

    async fn run(&self) -> Result<PublishReport, PlugkitError> {
        self.publication.validate()?;
        let files = assemble(&self.publication)?;

        info!(
            task = %self.name,
            coordinate = %self.publication.coordinate(),
            kind = %self.repository.kind(),
            repository = %self.repository.location(),
            "publishing"
        );

        let mut report = PublishReport {
            task: self.name.clone(),
            repository: self.repository.name().to_string(),
            location: self.repository.location(),
            files: Vec::with_capacity(files.len()),
            bytes: 0,
        };
        for file in files {
            self.repository.put(&file.path, &file.bytes).await?;
            report.bytes += file.bytes.len() as u64;
            report.files.push(file.path);
        }

        info!(task = %self.name, files = report.files.len(), bytes = report.bytes, "published");
        Ok(report)
    }
}

/// `main` + `local` becomes `publishMainPublicationToLocalRepository`.
pub fn task_name(publication: &str, repository: &str) -> String {
    format!(
        "publish{}PublicationTo{}Repository",
        capitalize(publication),
        capitalize(repository)
    )
}

/// `main` becomes `packageMainPublication`.
pub fn package_task_name(publication: &str) -> String {
    format!("package{}Publication", capitalize(publication))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Wires publications to repositories.
pub struct PublicationConfigurator;

impl PublicationConfigurator {
    /// One task per (publication, repository) pair, registered on `project`.
    ///
    /// Tasks are ordered publication-major, so within a repository the main
    /// publication precedes its markers. A task name that is already
    /// registered is a configuration error.
    pub fn configure(
        project: &mut Project,
        publications: &[Arc<PublicationDescriptor>],
        repositories: &[Arc<dyn ArtifactRepository>],
    ) -> Result<Vec<PublishTask>, PlugkitError> {
        let mut tasks = Vec::with_capacity(publications.len() * repositories.len());
        for publication in publications {
            for repository in repositories {
                let task = PublishTask::new(Arc::clone(publication), Arc::clone(repository));
                if !project.register_task(task.name()) {
                    return Err(PlugkitError::Configuration(format!(
                        "task `{}` is already registered on project `{}`",
                        task.name(),
                        project.name
                    )));
                }
                tasks.push(task);
            }
        }
        Ok(tasks)
    }
}

/// Run `tasks`, returning one result per task in the same order.
///
/// Tasks writing to the same repository location run sequentially in
/// order; distinct locations run concurrently. A failure does not stop
/// other tasks, except that a marker whose target archive failed in the
/// same location is skipped.
pub async fn run_tasks(tasks: &[PublishTask]) -> Vec<Result<PublishReport, PlugkitError>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut by_location: HashMap<String, usize> = HashMap::new();
    for (index, task) in tasks.iter().enumerate() {
        let group = *by_location
            .entry(task.repository.location())
            .or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
        groups[group].push(index);
    }

    let runs = groups.into_iter().map(|indices| async move {
        let mut out = Vec::with_capacity(indices.len());
        let mut failed: Vec<Coordinate> = Vec::new();
        for index in indices {
            let task = &tasks[index];
            let result = match &task.publication.component {
                Component::Marker { target } if failed.contains(target) => {
                    warn!(task = %task.name, target = %target, "skipping marker of failed publication");
                    Err(PlugkitError::Skipped(format!(
                        "`{target}` was not published to `{}`",
                        task.repository.name()
                    ))
                    .in_task(&task.name))
                }
                _ => task.execute().await,
            };
            if result.is_err() && matches!(task.publication.component, Component::Archive { .. }) {
                failed.push(task.publication.coordinate());
            }
            out.push((index, result));
        }
        out
    });

    let mut results: Vec<(usize, Result<PublishReport, PlugkitError>)> =
        join_all(runs).await.into_iter().flatten().collect();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::LocalRepository;
    use std::path::Path;

    fn marker(version: &str) -> Arc<PublicationDescriptor> {
        Arc::new(PublicationDescriptor {
            name: "ioExampleWeaverPluginMarker".into(),
            group_id: "io.example.weaver".into(),
            artifact_id: "io.example.weaver.plugin".into(),
            version: version.into(),
            component: Component::Marker {
                target: Coordinate::new("io.example", "weaver", "1.0.2"),
            },
        })
    }

    fn archive(artifact_id: &str, source: &Path) -> Arc<PublicationDescriptor> {
        Arc::new(PublicationDescriptor {
            name: "main".into(),
            group_id: "io.example".into(),
            artifact_id: artifact_id.into(),
            version: "1.0.2".into(),
            component: Component::Archive {
                source: source.to_path_buf(),
                bundled: vec![],
                runtime_dependencies: vec![],
            },
        })
    }

    #[test]
    fn task_names_follow_publication_and_repository() {
        assert_eq!(task_name("main", "local"), "publishMainPublicationToLocalRepository");
        assert_eq!(package_task_name("main"), "packageMainPublication");
        assert_eq!(
            task_name("ioExampleWeaverPluginMarker", "githubPackages"),
            "publishIoExampleWeaverPluginMarkerPublicationToGithubPackagesRepository"
        );
    }

    #[test]
    fn configure_pairs_every_publication_with_every_repository() {
        let mut project = Project::new("weaver");
        let repos: Vec<Arc<dyn ArtifactRepository>> = vec![
            Arc::new(LocalRepository::new("local", "/tmp/a")),
            Arc::new(LocalRepository::new("staging", "/tmp/b")),
        ];
        let tasks = PublicationConfigurator::configure(&mut project, &[marker("1.0.2")], &repos).unwrap();

        let names: Vec<&str> = tasks.iter().map(PublishTask::name).collect();
        assert_eq!(
            names,
            vec![
                "publishIoExampleWeaverPluginMarkerPublicationToLocalRepository",
                "publishIoExampleWeaverPluginMarkerPublicationToStagingRepository",
            ]
        );
        assert!(project.has_task("publishIoExampleWeaverPluginMarkerPublicationToStagingRepository"));
    }

    #[test]
    fn configure_rejects_duplicate_task() {
        let mut project = Project::new("weaver");
        let repos: Vec<Arc<dyn ArtifactRepository>> = vec![
            Arc::new(LocalRepository::new("local", "/tmp/a")),
            Arc::new(LocalRepository::new("local", "/tmp/b")),
        ];
        let err = PublicationConfigurator::configure(&mut project, &[marker("1.0.2")], &repos).unwrap_err();
        assert!(matches!(err, PlugkitError::Configuration(ref m) if m.contains("already registered")));
    }

    #[tokio::test]
    async fn invalid_publication_fails_before_any_write() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("repo");
        let task = PublishTask::new(marker(""), Arc::new(LocalRepository::new("local", &root)));

        let err = task.execute().await.unwrap_err();
        assert_eq!(err.task(), Some("publishIoExampleWeaverPluginMarkerPublicationToLocalRepository"));
        assert!(matches!(err.root(), PlugkitError::PublicationConfig(_)));
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn run_tasks_keeps_order_and_isolates_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let a: Arc<dyn ArtifactRepository> = Arc::new(LocalRepository::new("a", tmp.path().join("a")));
        let b: Arc<dyn ArtifactRepository> = Arc::new(LocalRepository::new("b", tmp.path().join("b")));
        let tasks = vec![
            PublishTask::new(marker("1.0.2"), Arc::clone(&a)),
            PublishTask::new(marker("not-semver"), Arc::clone(&b)),
            PublishTask::new(marker("1.0.3"), Arc::clone(&a)),
        ];

        let results = run_tasks(&tasks).await;
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        let third = results[2].as_ref().unwrap();
        assert_eq!(third.repository, "a");
        assert_eq!(third.files.len(), 2);
        assert!(tmp
            .path()
            .join("a/io/example/weaver/io.example.weaver.plugin/1.0.3/io.example.weaver.plugin-1.0.3.pom")
            .is_file());
    }

    #[tokio::test]
    async fn artifact_id_outside_root_fails_before_any_write() {
        let tmp = tempfile::tempdir().unwrap();
        let classes = tmp.path().join("classes");
        std::fs::create_dir_all(&classes).unwrap();
        std::fs::write(classes.join("Weaver.class"), "w").unwrap();
        let root = tmp.path().join("repo/inner");
        let task = PublishTask::new(
            archive("../../../../escaped", &classes),
            Arc::new(LocalRepository::new("local", &root)),
        );

        let err = task.execute().await.unwrap_err();
        assert!(matches!(err.root(), PlugkitError::PublicationConfig(m) if m.contains("path separator")));
        let entries: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "only the compiled output may exist");
    }

    #[tokio::test]
    async fn marker_is_skipped_when_its_archive_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("repo");
        let repo: Arc<dyn ArtifactRepository> = Arc::new(LocalRepository::new("local", &root));
        let tasks = vec![
            PublishTask::new(archive("weaver", &tmp.path().join("build/libs")), Arc::clone(&repo)),
            PublishTask::new(marker("1.0.2"), Arc::clone(&repo)),
        ];

        let results = run_tasks(&tasks).await;
        assert!(matches!(results[0].as_ref().unwrap_err().root(), PlugkitError::PublicationConfig(_)));
        let skipped = results[1].as_ref().unwrap_err();
        assert_eq!(skipped.task(), Some("publishIoExampleWeaverPluginMarkerPublicationToLocalRepository"));
        assert!(matches!(skipped.root(), PlugkitError::Skipped(m) if m.contains("io.example:weaver:1.0.2")));
        assert!(!root.exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn repositories_sharing_a_root_do_not_race() {
        let tmp = tempfile::tempdir().unwrap();
        let classes = tmp.path().join("classes");
        std::fs::create_dir_all(&classes).unwrap();
        std::fs::write(classes.join("Weaver.class"), "w").unwrap();
        let root = tmp.path().join("repo");

        for _ in 0..10 {
            let tasks: Vec<PublishTask> = ["a", "b", "c"]
                .into_iter()
                .map(|name| {
                    let repo: Arc<dyn ArtifactRepository> = Arc::new(LocalRepository::new(name, &root));
                    PublishTask::new(archive("weaver", &classes), repo)
                })
                .collect();
            for result in run_tasks(&tasks).await {
                assert!(result.is_ok(), "{:?}", result.err());
            }
        }
        assert!(root.join("io/example/weaver/1.0.2/weaver-1.0.2.tar.gz").is_file());
    }
}
