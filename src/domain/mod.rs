pub mod config;
pub mod entry;
pub mod error;
pub mod node_type;
pub mod project;
pub mod tree_path;

pub use config::{GitLabApiConfig, TreeConfig, parse_config_content};
pub use entry::{EntryType, FileMetadata, Metadata, TreeEntry};
pub use error::TreeError;
pub use node_type::NodeType;
pub use project::ProjectId;
