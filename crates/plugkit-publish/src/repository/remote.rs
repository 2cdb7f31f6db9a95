// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote HTTP repository.
//!
//! Files are uploaded with `PUT <base>/<relative path>`, authenticated with
//! HTTP basic auth when credentials are configured. Whether re-publishing an
//! existing version is allowed is the server's decision; a rejection
//! surfaces as `PlugkitError::Upload`.

use std::time::Duration;

use async_trait::async_trait;
use plugkit_core::{ArtifactRepository, PlugkitError, RepositoryKind};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Upload credentials, resolved from build properties.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub token: SecretString,
}

/// A repository reachable over HTTP(S).
#[derive(Debug, Clone)]
pub struct RemoteRepository {
    name: String,
    base_url: String,
    credentials: Option<Credentials>,
    client: reqwest::Client,
}

impl RemoteRepository {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        credentials: Option<Credentials>,
    ) -> Result<Self, PlugkitError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .user_agent(concat!("plugkit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlugkitError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            client,
        })
    }

    fn url_for(&self, relative_path: &str) -> String {
        format!("{}/{}", self.base_url, relative_path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ArtifactRepository for RemoteRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RepositoryKind {
        RepositoryKind::Remote
    }

    fn location(&self) -> String {
        self.base_url.clone()
    }

    async fn put(&self, relative_path: &str, bytes: &[u8]) -> Result<(), PlugkitError> {
        let url = self.url_for(relative_path);
        let mut request = self.client.put(&url).body(bytes.to_vec());
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(creds.token.expose_secret()));
        }

        let response = request.send().await.map_err(|e| PlugkitError::Upload {
            url: url.clone(),
            message: format!("request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = match status.as_u16() {
                401 | 403 => format!("authentication rejected (HTTP {status})"),
                _ => format!("server returned HTTP {status}"),
            };
            return Err(PlugkitError::Upload {
                url,
                message,
                source: None,
            });
        }

        debug!(repository = %self.name, %url, bytes = bytes.len(), "uploaded file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{basic_auth, body_bytes, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn creds() -> Credentials {
        Credentials {
            username: "octocat".into(),
            token: SecretString::from("ghp_secret".to_string()),
        }
    }

    #[tokio::test]
    async fn put_uploads_with_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/releases/io/example/weaver/1.0.2/weaver-1.0.2.pom"))
            .and(basic_auth("octocat", "ghp_secret"))
            .and(body_bytes(b"<project/>".to_vec()))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let repo = RemoteRepository::new("github", format!("{}/releases/", server.uri()), Some(creds())).unwrap();
        repo.put("io/example/weaver/1.0.2/weaver-1.0.2.pom", b"<project/>")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unauthorized_is_upload_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let repo = RemoteRepository::new("github", server.uri(), None).unwrap();
        let err = repo.put("a/b.pom", b"x").await.unwrap_err();
        match err {
            PlugkitError::Upload { url, message, .. } => {
                assert!(url.ends_with("/a/b.pom"));
                assert!(message.contains("authentication rejected"));
            }
            other => panic!("expected Upload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn conflict_is_upload_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let repo = RemoteRepository::new("github", server.uri(), Some(creds())).unwrap();
        let err = repo.put("a/b.pom", b"x").await.unwrap_err();
        assert!(matches!(err, PlugkitError::Upload { ref message, .. } if message.contains("409")));
    }

    #[tokio::test]
    async fn unreachable_server_is_upload_error() {
        let repo = RemoteRepository::new("down", "http://127.0.0.1:9", None).unwrap();
        let err = repo.put("a/b.pom", b"x").await.unwrap_err();
        assert!(matches!(err, PlugkitError::Upload { .. }));
    }

    #[test]
    fn debug_does_not_leak_token() {
        let repo = RemoteRepository::new("github", "https://repo.example.com", Some(creds())).unwrap();
        let rendered = format!("{repo:?}");
        assert!(!rendered.contains("ghp_secret"));
    }
}
