//! Shared GitLab API stub for integration tests.

use gitlab_tree::GitLabApiConfig;
use mockito::{Matcher, Mock, Server, ServerGuard};
use url::Url;

pub const PROJECT: &str = "42";
pub const REF: &str = "main";

/// A mock GitLab server serving one project.
pub struct GitLabStub {
    server: ServerGuard,
}

#[allow(dead_code)]
impl GitLabStub {
    pub fn new() -> Self {
        Self { server: Server::new() }
    }

    pub fn config(&self) -> GitLabApiConfig {
        GitLabApiConfig {
            api_url: Url::parse(&format!("{}/api/v4", self.server.url())).unwrap(),
            timeout_secs: 5,
            per_page: 100,
        }
    }

    fn repository_path(tail: &str) -> String {
        format!("/api/v4/projects/{}/repository/{}", PROJECT, tail)
    }

    /// Listing for the root directory (no `path` query parameter).
    pub fn root_tree(&mut self, body: &str) -> Mock {
        self.server
            .mock("GET", Self::repository_path("tree").as_str())
            .match_query(Matcher::Regex(format!("^ref={}&per_page=", REF)))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
    }

    /// Listing for a single-segment directory.
    pub fn tree(&mut self, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock("GET", Self::repository_path("tree").as_str())
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("ref".into(), REF.into()),
                Matcher::UrlEncoded("path".into(), path.into()),
            ]))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
    }

    /// File metadata for a single-segment path.
    pub fn file(&mut self, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock("GET", Self::repository_path(&format!("files/{}", path)).as_str())
            .match_query(Matcher::UrlEncoded("ref".into(), REF.into()))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
    }

    pub fn raw_blob(&mut self, content_id: &str, body: &[u8]) -> Mock {
        self.server
            .mock("GET", Self::repository_path(&format!("blobs/{}/raw", content_id)).as_str())
            .with_status(200)
            .with_body(body)
    }
}

pub fn file_json(name: &str, blob_id: &str, size: u64) -> String {
    format!(
        r#"{{"file_name":"{name}","file_path":"{name}","size":{size},"encoding":"base64","content":"","blob_id":"{blob_id}","last_commit_id":"c0"}}"#
    )
}
