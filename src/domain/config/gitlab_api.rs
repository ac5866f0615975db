//! GitLab API configuration domain models.

use serde::Deserialize;
use url::Url;

use crate::domain::TreeError;

/// Largest page size the GitLab REST API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeConfig {
    /// GitLab API configuration.
    #[serde(default)]
    pub gitlab: GitLabApiConfig,
}

impl TreeConfig {
    pub fn validate(&self) -> Result<(), TreeError> {
        self.gitlab.validate()
    }
}

/// GitLab API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitLabApiConfig {
    /// Base URL of the REST API, e.g. `https://gitlab.com/api/v4`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Page size used for directory listings.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for GitLabApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            per_page: default_per_page(),
        }
    }
}

impl GitLabApiConfig {
    /// Configuration pointing at another server with default tuning.
    pub fn with_api_url(api_url: Url) -> Self {
        Self { api_url, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), TreeError> {
        if self.timeout_secs == 0 {
            return Err(TreeError::config_error("timeout_secs must be greater than 0"));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(TreeError::config_error(format!(
                "per_page must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }
        if !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(TreeError::config_error(format!(
                "api_url must use http or https, got '{}'",
                self.api_url.scheme()
            )));
        }
        if self.api_url.cannot_be_a_base() {
            return Err(TreeError::config_error("api_url must be a base URL"));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("https://gitlab.com/api/v4").expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}
