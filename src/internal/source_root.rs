use serde::Deserialize;
use serde::Serialize;

const GIT_SOURCE_CONTROL: &str = "git";

/// Literal recorded for roots a provider does not apply to.
pub const NOT_APPLICABLE: &str = "N/A";

/// A local directory backed by a repository, as discovered by the build.
/// Submodules are roots of their own, pointing back to their container.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RepositoryRoot {
    /// Local path, always ending with a directory separator.
    pub path: String,
    /// `git`, `tfvc`, ...
    pub source_control: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    /// The remote translated to https.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm_repository_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containing_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_root: Option<String>,
    /// Deterministic build path, replacing `path` in the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_path: Option<String>,
}

impl RepositoryRoot {
    pub fn new(path: impl Into<String>, source_control: impl Into<String>) -> Self {
        let mut path = path.into();
        if !ends_with_separator(&path) {
            path.push('/');
        }

        Self {
            path,
            source_control: source_control.into(),
            ..Default::default()
        }
    }

    pub fn git(path: impl Into<String>, repository_url: &str, revision_id: &str) -> Self {
        Self {
            repository_url: Some(repository_url.to_string()),
            revision_id: Some(revision_id.to_string()),
            ..Self::new(path, GIT_SOURCE_CONTROL)
        }
    }

    pub fn is_git(&self) -> bool {
        self.source_control.eq_ignore_ascii_case(GIT_SOURCE_CONTROL)
    }

    /// The translated remote when there is one, the recorded remote
    /// otherwise.
    pub fn remote_url(&self) -> Option<&str> {
        non_empty(self.scm_repository_url.as_deref())
            .or_else(|| non_empty(self.repository_url.as_deref()))
    }

    /// Whether a source link url (or `N/A`) has already been attached.
    pub fn is_resolved(&self) -> bool {
        non_empty(self.source_link_url.as_deref()).is_some()
    }

    /// The attached source link url, `N/A` excluded.
    pub fn applicable_source_link_url(&self) -> Option<&str> {
        non_empty(self.source_link_url.as_deref()).filter(|url| *url != NOT_APPLICABLE)
    }

    /// The manifest key prefix: the mapped path when the build maps paths.
    pub fn document_path(&self) -> &str {
        non_empty(self.mapped_path.as_deref()).unwrap_or(&self.path)
    }
}

pub fn ends_with_separator(path: &str) -> bool {
    path.ends_with('/') || path.ends_with('\\')
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "source_root_test.rs"]
mod tests;
