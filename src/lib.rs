//! gitlab-tree: browse a GitLab repository at a ref as lazily resolved files
//! and directories.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

pub use adapters::{HttpGitLabProvider, HttpsRepositoryUriResolver, SshRepositoryUriResolver};
pub use domain::{
    EntryType, FileMetadata, GitLabApiConfig, Metadata, NodeType, ProjectId, TreeEntry, TreeError,
    parse_config_content,
};
pub use ports::{ProviderError, RemoteTreeProvider, RepositoryUriResolver, host_from_api_uri};
pub use tree::{Node, ResolutionStatus};

/// Open the root of `project` at `git_ref` on the server described by `config`.
///
/// Issues no remote call; the root resolves on first use.
pub fn open_tree(config: &GitLabApiConfig, project: &str, git_ref: &str) -> Result<Node, TreeError> {
    let project = ProjectId::new(project)?;
    let provider = HttpGitLabProvider::new(config)?;
    Ok(Node::root(Arc::new(provider), project, git_ref))
}
