use serde::{Deserialize, Deserializer};

use super::TreeError;

/// A validated GitLab project identifier.
///
/// Either a numeric project id (`"42"`) or a full project path
/// (`"group/subgroup/name"`). Path segments must be non-empty and may not be
/// `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    /// Validate and create a new instance.
    pub fn new(id: &str) -> Result<Self, TreeError> {
        if is_valid_project(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(TreeError::InvalidProject(id.to_string()))
        }
    }

    /// Build the `namespace/name` form from an owner and repository name.
    pub fn from_owner_and_name(owner: &str, name: &str) -> Result<Self, TreeError> {
        Self::new(&format!("{}/{}", owner, name))
    }

    /// Return the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_project(id: &str) -> bool {
    if id.is_empty() || id.chars().any(|c| c.is_whitespace() || c == '\\') {
        return false;
    }
    id.split('/').all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

impl std::ops::Deref for ProjectId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        self
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ProjectId::new(&s).map_err(serde::de::Error::custom)
    }
}
