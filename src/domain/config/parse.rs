//! Pure parse/validate for tree configuration (`gitlab-tree.toml`).

use crate::domain::{GitLabApiConfig, TreeConfig, TreeError};

/// Parse and validate GitLab API configuration from TOML content.
///
/// A missing `[gitlab]` table yields the defaults.
pub fn parse_config_content(content: &str) -> Result<GitLabApiConfig, TreeError> {
    let config: TreeConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config.gitlab)
}
