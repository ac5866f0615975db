//! Remote tree records: listing entries, single-file metadata and the cached
//! value a node holds once resolved.

use serde::Deserialize;

/// Kind of a listing entry as reported by the tree endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// A directory.
    Tree,
    /// A file.
    Blob,
    /// A submodule pointer; treated as a non-directory.
    Commit,
}

impl EntryType {
    pub fn is_directory(&self) -> bool {
        matches!(self, EntryType::Tree)
    }
}

/// One child record of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    /// Content id (blob or tree sha).
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Full path from the repository root.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub mode: String,
}

impl TreeEntry {
    pub fn new(name: impl Into<String>, entry_type: EntryType, id: impl Into<String>) -> Self {
        let name = name.into();
        Self { id: id.into(), path: name.clone(), name, entry_type, mode: String::new() }
    }
}

/// Metadata of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub file_name: String,
    pub file_path: String,
    /// Identifier used to fetch the raw bytes.
    pub content_id: String,
    /// Unknown when the metadata came from a parent listing.
    pub size: Option<u64>,
    pub last_commit_id: Option<String>,
}

impl FileMetadata {
    /// Metadata carried by a listing entry, available without a further fetch.
    pub fn from_entry(entry: &TreeEntry, file_path: impl Into<String>) -> Self {
        Self {
            file_name: entry.name.clone(),
            file_path: file_path.into(),
            content_id: entry.id.clone(),
            size: None,
            last_commit_id: None,
        }
    }
}

/// Cached result of resolving a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metadata {
    /// The node is a directory; entries of the listing that proved it.
    Listing(Vec<TreeEntry>),
    /// The node is a single file.
    File(FileMetadata),
}
