pub mod gitlab_http;
pub mod repository_uri;

pub use gitlab_http::HttpGitLabProvider;
pub use repository_uri::{HttpsRepositoryUriResolver, SshRepositoryUriResolver};
