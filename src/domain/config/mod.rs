pub mod gitlab_api;
pub mod parse;

pub use gitlab_api::{GitLabApiConfig, TreeConfig};
pub use parse::parse_config_content;
