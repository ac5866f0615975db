mod repository_uri;
mod tree_provider;

pub use repository_uri::{DEFAULT_HOST, RepositoryUriResolver, host_from_api_uri};
pub use tree_provider::{ProviderError, RemoteTreeProvider};
