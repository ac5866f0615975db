//! Repository URI resolver port definition.

use url::Url;

/// Host used when no usable API URL is configured.
pub const DEFAULT_HOST: &str = "gitlab.com";

/// Resolves the clone URI of a repository from the API URI, owner and
/// repository name.
pub trait RepositoryUriResolver {
    fn resolve_repository_uri(&self, api_uri: &str, owner: &str, repository: &str) -> String;
}

/// Return `host[:port]` of a GitLab server from its API URL.
///
/// A port written in the URL is kept even when it is the scheme default.
/// Falls back to `gitlab.com` when the URL is absent, unparseable or has no
/// host.
pub fn host_from_api_uri(api_uri: Option<&str>) -> String {
    api_uri
        .and_then(|raw| {
            let endpoint = Url::parse(raw).ok()?;
            let host = endpoint.host_str()?.to_string();
            // `Url` normalizes default ports away; the raw authority keeps them.
            let port = raw
                .parse::<http::Uri>()
                .ok()
                .and_then(|uri| uri.port_u16())
                .or_else(|| endpoint.port());
            Some(match port {
                Some(port) => format!("{}:{}", host, port),
                None => host,
            })
        })
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}
