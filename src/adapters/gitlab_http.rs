//! GitLab REST v4 tree provider implementation using reqwest.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use url::Url;

use crate::domain::{FileMetadata, GitLabApiConfig, ProjectId, TreeEntry, TreeError};
use crate::ports::{ProviderError, RemoteTreeProvider};

const PRIVATE_TOKEN: &str = "PRIVATE-TOKEN";
const NEXT_PAGE: &str = "x-next-page";

/// HTTP provider reading repository trees from a GitLab server.
#[derive(Clone)]
pub struct HttpGitLabProvider {
    api_url: Url,
    per_page: u32,
    private_token: Option<String>,
    client: Client,
}

impl std::fmt::Debug for HttpGitLabProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGitLabProvider")
            .field("api_url", &self.api_url)
            .field("per_page", &self.per_page)
            .field("private_token", &self.private_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpGitLabProvider {
    /// Create a new provider from validated configuration.
    pub fn new(config: &GitLabApiConfig) -> Result<Self, TreeError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TreeError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_url: config.api_url.clone(),
            per_page: config.per_page,
            private_token: None,
            client,
        })
    }

    /// Attach a token supplied by the hosting application to every request.
    pub fn with_private_token(mut self, token: impl Into<String>) -> Self {
        self.private_token = Some(token.into());
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn endpoint(&self, project: &ProjectId, tail: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::transport("API URL cannot be a base", None))?
            .pop_if_empty()
            .push("projects")
            .push(project.as_str())
            .extend(tail);
        Ok(url)
    }

    fn get(&self, url: Url, path: &str) -> Result<Response, ProviderError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.private_token {
            request = request.header(PRIVATE_TOKEN, token);
        }

        let response = request
            .send()
            .map_err(|e| ProviderError::transport(format!("HTTP request failed: {}", e), None))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status == StatusCode::NOT_FOUND {
            Err(ProviderError::not_found(path))
        } else if status.is_server_error() {
            Err(ProviderError::transport(
                format!("Server error ({})", status.as_u16()),
                Some(status.as_u16()),
            ))
        } else {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            Err(ProviderError::transport(
                format!("API error ({}): {}", status.as_u16(), error_text),
                Some(status.as_u16()),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiFile {
    file_name: String,
    file_path: String,
    size: u64,
    blob_id: String,
    #[serde(default)]
    last_commit_id: Option<String>,
}

impl From<ApiFile> for FileMetadata {
    fn from(file: ApiFile) -> Self {
        Self {
            file_name: file.file_name,
            file_path: file.file_path,
            content_id: file.blob_id,
            size: Some(file.size),
            last_commit_id: file.last_commit_id,
        }
    }
}

fn next_page(response: &Response) -> Option<u32> {
    response
        .headers()
        .get(NEXT_PAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u32>().ok())
}

impl RemoteTreeProvider for HttpGitLabProvider {
    fn fetch_tree(
        &self,
        project: &ProjectId,
        path: &str,
        git_ref: &str,
    ) -> Result<Vec<TreeEntry>, ProviderError> {
        tracing::debug!(%project, path, git_ref, "fetching repository tree");

        let mut entries = Vec::new();
        let mut page = 1_u32;
        loop {
            let mut url = self.endpoint(project, &["repository", "tree"])?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("ref", git_ref);
                if !path.is_empty() {
                    query.append_pair("path", path);
                }
                query.append_pair("per_page", &self.per_page.to_string());
                query.append_pair("page", &page.to_string());
            }

            let response = self.get(url, path)?;
            let following = next_page(&response);
            let batch: Vec<TreeEntry> = response.json().map_err(|e| {
                ProviderError::transport(format!("Failed to parse tree response: {}", e), None)
            })?;
            tracing::trace!(page, count = batch.len(), "received tree page");
            entries.extend(batch);

            match following {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        Ok(entries)
    }

    fn fetch_file_metadata(
        &self,
        project: &ProjectId,
        path: &str,
        git_ref: &str,
    ) -> Result<FileMetadata, ProviderError> {
        tracing::debug!(%project, path, git_ref, "fetching file metadata");

        let mut url = self.endpoint(project, &["repository", "files", path])?;
        url.query_pairs_mut().append_pair("ref", git_ref);

        let body = self
            .get(url, path)?
            .text()
            .map_err(|e| ProviderError::transport(format!("Failed to read response: {}", e), None))?;

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            ProviderError::transport(format!("Failed to parse file response: {}", e), None)
        })?;
        if value.is_array() {
            return Err(ProviderError::type_mismatch(path));
        }

        let file: ApiFile = serde_json::from_value(value).map_err(|e| {
            ProviderError::transport(format!("Failed to parse file response: {}", e), None)
        })?;
        Ok(file.into())
    }

    fn fetch_raw_content(
        &self,
        project: &ProjectId,
        content_id: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        tracing::debug!(%project, content_id, "fetching raw blob");

        let url = self.endpoint(project, &["repository", "blobs", content_id, "raw"])?;
        let bytes = self
            .get(url, content_id)?
            .bytes()
            .map_err(|e| ProviderError::transport(format!("Failed to read blob: {}", e), None))?;
        Ok(bytes.to_vec())
    }
}
