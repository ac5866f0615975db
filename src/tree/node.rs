//! A handle to one path of a repository at one ref.
//!
//! Nodes resolve their own type on first use and cache the result for their
//! lifetime. Handles never share mutable state: two nodes for the same path
//! resolve independently.

use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::domain::tree_path;
use crate::domain::{FileMetadata, Metadata, NodeType, ProjectId, TreeEntry, TreeError};
use crate::ports::{ProviderError, RemoteTreeProvider};

use super::ResolutionStatus;

/// Immutable context shared by every node of one tree.
struct TreeContext {
    provider: Arc<dyn RemoteTreeProvider>,
    project: ProjectId,
    git_ref: String,
}

pub struct Node {
    context: Arc<TreeContext>,
    path: String,
    status: ResolutionStatus,
    metadata: Option<Metadata>,
    resolved: bool,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("project", &self.context.project)
            .field("git_ref", &self.context.git_ref)
            .field("path", &self.path)
            .field("status", &self.status)
            .field("resolved", &self.resolved)
            .finish()
    }
}

/// Convert a provider not-found into an absent result.
fn absorb_not_found<T>(result: Result<T, ProviderError>) -> Result<Option<T>, TreeError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ProviderError::NotFound { .. }) => Ok(None),
        Err(other) => Err(other.into()),
    }
}

impl Node {
    /// Root of `project` at `git_ref`. Issues no remote call.
    pub fn root(
        provider: Arc<dyn RemoteTreeProvider>,
        project: ProjectId,
        git_ref: impl Into<String>,
    ) -> Self {
        let context = TreeContext { provider, project, git_ref: git_ref.into() };
        Self {
            context: Arc::new(context),
            path: String::new(),
            status: ResolutionStatus::DirectoryAssumed,
            metadata: None,
            resolved: false,
        }
    }

    fn speculative(&self, path: String, status: ResolutionStatus) -> Self {
        Self {
            context: Arc::clone(&self.context),
            path,
            status,
            metadata: None,
            resolved: false,
        }
    }

    fn child_from_entry(&self, entry: &TreeEntry) -> Self {
        let path = tree_path::join(&self.path, &entry.name);
        if entry.entry_type.is_directory() {
            self.speculative(path, ResolutionStatus::DirectoryConfirmed)
        } else {
            let metadata = Metadata::File(FileMetadata::from_entry(entry, path.clone()));
            Self {
                context: Arc::clone(&self.context),
                path,
                status: ResolutionStatus::NonDirectoryConfirmed,
                metadata: Some(metadata),
                resolved: true,
            }
        }
    }

    /// Slash-separated path from the repository root; empty for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment; empty for the root.
    pub fn name(&self) -> &str {
        tree_path::file_name(&self.path)
    }

    pub fn git_ref(&self) -> &str {
        &self.context.git_ref
    }

    pub fn project(&self) -> &ProjectId {
        &self.context.project
    }

    pub fn status(&self) -> ResolutionStatus {
        self.status
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether a fetch attempt has completed; no further remote call will be
    /// made to resolve this node.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    fn advance(&mut self, next: ResolutionStatus) {
        debug_assert!(self.status.can_advance_to(next), "{:?} -> {:?}", self.status, next);
        if self.status != next {
            tracing::debug!(path = %self.path, from = ?self.status, to = ?next, "node type resolved");
            self.status = next;
        }
    }

    fn fetch_listing(&self) -> Result<Vec<TreeEntry>, ProviderError> {
        tracing::debug!(path = %self.path, git_ref = %self.context.git_ref, "listing directory");
        self.context.provider.fetch_tree(&self.context.project, &self.path, &self.context.git_ref)
    }

    fn fetch_file(&self) -> Result<FileMetadata, ProviderError> {
        tracing::debug!(path = %self.path, git_ref = %self.context.git_ref, "fetching file metadata");
        self.context.provider.fetch_file_metadata(
            &self.context.project,
            &self.path,
            &self.context.git_ref,
        )
    }

    fn fetch_metadata(&mut self) -> Result<Option<Metadata>, TreeError> {
        if self.status.expects_directory() {
            return self.fetch_directory_metadata();
        }
        let unresolved = self.status == ResolutionStatus::Unresolved;
        match self.fetch_file() {
            Ok(file) => {
                self.advance(ResolutionStatus::NonDirectoryConfirmed);
                Ok(Some(Metadata::File(file)))
            }
            // Only an unhinted node may turn out to be a directory.
            Err(ProviderError::TypeMismatch { .. }) if unresolved => {
                tracing::debug!(path = %self.path, "not a file, falling back to listing");
                self.fetch_directory_metadata()
            }
            Err(ProviderError::NotFound { .. }) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    fn fetch_directory_metadata(&mut self) -> Result<Option<Metadata>, TreeError> {
        match absorb_not_found(self.fetch_listing())? {
            Some(entries) => {
                self.advance(ResolutionStatus::DirectoryConfirmed);
                Ok(Some(Metadata::Listing(entries)))
            }
            None => Ok(None),
        }
    }

    /// Resolve this node's metadata, fetching it at most once.
    ///
    /// `None` means the path does not exist at this ref. Transport failures
    /// leave the node unresolved.
    pub fn resolve_metadata(&mut self) -> Result<Option<&Metadata>, TreeError> {
        if !self.resolved {
            self.metadata = self.fetch_metadata()?;
            self.resolved = true;
        }
        Ok(self.metadata.as_ref())
    }

    /// Speculative child; issues no remote call.
    pub fn child_named(&self, name: &str, assume_is_directory: bool) -> Node {
        self.speculative(
            tree_path::join(&self.path, name),
            ResolutionStatus::from_hint(assume_is_directory),
        )
    }

    /// Descendant at a relative slash-separated path; issues no remote call.
    ///
    /// Intermediate segments are assumed to be directories, the last one is
    /// unresolved.
    pub fn child(&self, relative: &str) -> Node {
        let mut segments = tree_path::segments(relative).peekable();
        let mut path = self.path.clone();
        let mut status = self.status;
        while let Some(segment) = segments.next() {
            path = tree_path::join(&path, segment);
            status = ResolutionStatus::from_hint(segments.peek().is_some());
        }
        self.speculative(path, status)
    }

    /// Parent directory handle; `None` for the root. Issues no remote call.
    pub fn parent(&self) -> Option<Node> {
        tree_path::parent(&self.path)
            .map(|parent| self.speculative(parent.to_string(), ResolutionStatus::DirectoryAssumed))
    }

    /// List immediate children with a fresh remote call.
    ///
    /// Directory children are confirmed but unfetched; file children carry the
    /// metadata from the listing. A missing path lists as empty.
    pub fn list_children(&self) -> Result<Vec<Node>, TreeError> {
        let entries = absorb_not_found(self.fetch_listing())?.unwrap_or_default();
        Ok(entries.iter().map(|entry| self.child_from_entry(entry)).collect())
    }

    pub fn type_of(&mut self) -> Result<NodeType, TreeError> {
        Ok(match self.resolve_metadata()? {
            Some(Metadata::Listing(_)) => NodeType::Directory,
            Some(Metadata::File(_)) => NodeType::RegularFile,
            None => NodeType::Nonexistent,
        })
    }

    pub fn exists(&mut self) -> Result<bool, TreeError> {
        Ok(self.type_of()? != NodeType::Nonexistent)
    }

    pub fn is_directory(&mut self) -> Result<bool, TreeError> {
        Ok(self.type_of()? == NodeType::Directory)
    }

    pub fn is_file(&mut self) -> Result<bool, TreeError> {
        Ok(self.type_of()? == NodeType::RegularFile)
    }

    /// Stream of the file's bytes. Fetched anew on every call.
    pub fn read_content(&mut self) -> Result<Cursor<Vec<u8>>, TreeError> {
        self.resolve_metadata()?;
        let content_id = match &self.metadata {
            Some(Metadata::File(file)) => file.content_id.clone(),
            Some(Metadata::Listing(_)) => return Err(TreeError::IsADirectory(self.path.clone())),
            None => return Err(TreeError::NotFound(self.path.clone())),
        };

        let bytes = self.context.provider.fetch_raw_content(&self.context.project, &content_id)?;
        Ok(Cursor::new(bytes))
    }

    pub fn read_bytes(&mut self) -> Result<Vec<u8>, TreeError> {
        let mut buf = Vec::new();
        self.read_content()?.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// File content as UTF-8 text.
    pub fn read_to_string(&mut self) -> Result<String, TreeError> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|e| {
            TreeError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}
