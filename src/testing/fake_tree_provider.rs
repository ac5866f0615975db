use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::domain::{EntryType, FileMetadata, ProjectId, TreeEntry};
use crate::domain::tree_path;
use crate::ports::{ProviderError, RemoteTreeProvider};

/// One recorded provider invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderCall {
    Tree(String),
    File(String),
    Raw(String),
}

/// In-memory repository tree that records every call it serves.
#[derive(Clone, Default)]
pub struct FakeTreeProvider {
    directories: HashMap<String, Vec<TreeEntry>>,
    files: HashMap<String, FileMetadata>,
    blobs: HashMap<String, Vec<u8>>,
    failing: HashSet<ProviderCall>,
    pub calls: Arc<Mutex<Vec<ProviderCall>>>,
}

impl FakeTreeProvider {
    /// A provider whose root directory exists and is empty.
    pub fn new() -> Self {
        let mut provider = Self::default();
        provider.directories.insert(String::new(), Vec::new());
        provider
    }

    /// Add a directory (and any missing ancestors).
    pub fn with_dir(mut self, path: &str) -> Self {
        self.ensure_dir(path);
        self
    }

    /// Add a file with the given content id and bytes (and any missing ancestors).
    pub fn with_file(mut self, path: &str, content_id: &str, content: &[u8]) -> Self {
        let parent = tree_path::parent(path).unwrap_or("").to_string();
        self.ensure_dir(&parent);
        let name = tree_path::file_name(path);
        self.push_entry(&parent, TreeEntry::new(name, EntryType::Blob, content_id));
        self.files.insert(
            path.to_string(),
            FileMetadata {
                file_name: name.to_string(),
                file_path: path.to_string(),
                content_id: content_id.to_string(),
                size: Some(content.len() as u64),
                last_commit_id: None,
            },
        );
        self.blobs.insert(content_id.to_string(), content.to_vec());
        self
    }

    /// List a blob in its parent directory without serving metadata for it,
    /// as if it was removed after the listing.
    pub fn with_listed_blob(mut self, path: &str, content_id: &str) -> Self {
        let parent = tree_path::parent(path).unwrap_or("").to_string();
        self.ensure_dir(&parent);
        self.push_entry(&parent, TreeEntry::new(tree_path::file_name(path), EntryType::Blob, content_id));
        self
    }

    /// Make one specific call fail with a transport error.
    pub fn failing_at(mut self, call: ProviderCall) -> Self {
        self.failing.insert(call);
        self
    }

    pub fn recorded_calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn ensure_dir(&mut self, path: &str) {
        if self.directories.contains_key(path) {
            return;
        }
        if let Some(parent) = tree_path::parent(path) {
            self.ensure_dir(parent);
            let parent = parent.to_string();
            let name = tree_path::file_name(path);
            self.push_entry(&parent, TreeEntry::new(name, EntryType::Tree, format!("tree-{}", path)));
        }
        self.directories.insert(path.to_string(), Vec::new());
    }

    fn push_entry(&mut self, dir: &str, mut entry: TreeEntry) {
        entry.path = tree_path::join(dir, &entry.name);
        if let Some(entries) = self.directories.get_mut(dir) {
            entries.push(entry);
        }
    }

    fn record(&self, call: ProviderCall) -> Result<(), ProviderError> {
        let failing = self.failing.contains(&call);
        self.calls.lock().unwrap().push(call.clone());
        if failing {
            return Err(ProviderError::transport(format!("connection reset during {:?}", call), None));
        }
        Ok(())
    }
}

impl RemoteTreeProvider for FakeTreeProvider {
    fn fetch_tree(
        &self,
        _project: &ProjectId,
        path: &str,
        _git_ref: &str,
    ) -> Result<Vec<TreeEntry>, ProviderError> {
        self.record(ProviderCall::Tree(path.to_string()))?;
        self.directories.get(path).cloned().ok_or_else(|| ProviderError::not_found(path))
    }

    fn fetch_file_metadata(
        &self,
        _project: &ProjectId,
        path: &str,
        _git_ref: &str,
    ) -> Result<FileMetadata, ProviderError> {
        self.record(ProviderCall::File(path.to_string()))?;
        if self.directories.contains_key(path) {
            return Err(ProviderError::type_mismatch(path));
        }
        self.files.get(path).cloned().ok_or_else(|| ProviderError::not_found(path))
    }

    fn fetch_raw_content(
        &self,
        _project: &ProjectId,
        content_id: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        self.record(ProviderCall::Raw(content_id.to_string()))?;
        self.blobs.get(content_id).cloned().ok_or_else(|| ProviderError::not_found(content_id))
    }
}
