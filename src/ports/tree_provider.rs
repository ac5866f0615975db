//! Remote tree provider port definition.

use thiserror::Error;

use crate::domain::{FileMetadata, ProjectId, TreeEntry, TreeError};

/// Failure reported by a remote tree provider.
///
/// `NotFound` and `TypeMismatch` are distinct so a node can tell "absent"
/// apart from "present, but not the requested kind".
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Path does not exist at the requested ref.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Path exists but is not the kind of node the request targets.
    #[error("Type mismatch at '{path}'")]
    TypeMismatch { path: String },

    /// Network failure, unexpected status or malformed payload.
    #[error("{message}")]
    Transport { message: String, status: Option<u16> },
}

impl ProviderError {
    pub fn not_found(path: impl Into<String>) -> Self {
        ProviderError::NotFound { path: path.into() }
    }

    pub fn type_mismatch(path: impl Into<String>) -> Self {
        ProviderError::TypeMismatch { path: path.into() }
    }

    pub fn transport(message: impl Into<String>, status: Option<u16>) -> Self {
        ProviderError::Transport { message: message.into(), status }
    }
}

impl From<ProviderError> for TreeError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound { path } => TreeError::NotFound(path),
            ProviderError::TypeMismatch { path } => {
                TreeError::transport(format!("Unexpected entry kind at '{}'", path), None)
            }
            ProviderError::Transport { message, status } => TreeError::Transport { message, status },
        }
    }
}

/// Port for read-only access to a repository tree pinned at a ref.
pub trait RemoteTreeProvider: Send + Sync {
    /// List the immediate children of a directory, in provider order.
    fn fetch_tree(
        &self,
        project: &ProjectId,
        path: &str,
        git_ref: &str,
    ) -> Result<Vec<TreeEntry>, ProviderError>;

    /// Fetch metadata of a single file.
    ///
    /// Fails with `TypeMismatch` when the path denotes a directory.
    fn fetch_file_metadata(
        &self,
        project: &ProjectId,
        path: &str,
        git_ref: &str,
    ) -> Result<FileMetadata, ProviderError>;

    /// Fetch the raw bytes of a file by content id.
    fn fetch_raw_content(
        &self,
        project: &ProjectId,
        content_id: &str,
    ) -> Result<Vec<u8>, ProviderError>;
}
