//! Clone URI resolvers for GitLab repositories.

use url::Url;

use crate::ports::{RepositoryUriResolver, host_from_api_uri};

/// Resolves `https://host[:port]/owner/repository.git`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpsRepositoryUriResolver;

impl RepositoryUriResolver for HttpsRepositoryUriResolver {
    fn resolve_repository_uri(&self, api_uri: &str, owner: &str, repository: &str) -> String {
        format!("https://{}/{}/{}.git", host_from_api_uri(Some(api_uri)), owner, repository)
    }
}

/// Resolves `git@host:owner/repository.git`.
///
/// The API port is not the SSH port, so it is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SshRepositoryUriResolver;

impl RepositoryUriResolver for SshRepositoryUriResolver {
    fn resolve_repository_uri(&self, api_uri: &str, owner: &str, repository: &str) -> String {
        let host = Url::parse(api_uri)
            .ok()
            .and_then(|endpoint| endpoint.host_str().map(str::to_string))
            .unwrap_or_else(|| host_from_api_uri(None));
        format!("git@{}:{}/{}.git", host, owner, repository)
    }
}
