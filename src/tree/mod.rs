//! Lazily resolved view of a repository tree pinned at a ref.

mod node;
mod status;

pub use node::Node;
pub use status::ResolutionStatus;
