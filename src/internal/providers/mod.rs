use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::internal::errors::SourceLinkError;
use crate::internal::mapping::HostMapping;
use crate::internal::uri::path_and_query;
use crate::internal::uri::Authority;

pub(crate) mod grammar;
pub(crate) use grammar::ParsedRepositoryPath;

pub(crate) mod version;

mod azure_devops_server;
mod azure_repos;
mod bitbucket;
mod gitea;
mod github;
mod gitlab;
mod gitweb;

pub(crate) use azure_devops_server::AzureDevOpsServer;
pub(crate) use azure_repos::AzureRepos;
pub(crate) use bitbucket::Bitbucket;
pub(crate) use gitea::Gitea;
pub(crate) use github::GitHub;
pub(crate) use gitlab::GitLab;
pub(crate) use gitweb::GitWeb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "github")]
    GitHub,
    #[serde(rename = "gitlab")]
    GitLab,
    #[serde(rename = "bitbucket")]
    Bitbucket,
    #[serde(rename = "azure-repos")]
    AzureRepos,
    #[serde(rename = "azure-devops-server", alias = "tfs")]
    AzureDevOpsServer,
    #[serde(rename = "gitea")]
    Gitea,
    #[serde(rename = "gitweb")]
    GitWeb,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 7] = [
        ProviderKind::GitHub,
        ProviderKind::GitLab,
        ProviderKind::Bitbucket,
        ProviderKind::AzureRepos,
        ProviderKind::AzureDevOpsServer,
        ProviderKind::Gitea,
        ProviderKind::GitWeb,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "github",
            ProviderKind::GitLab => "gitlab",
            ProviderKind::Bitbucket => "bitbucket",
            ProviderKind::AzureRepos => "azure-repos",
            ProviderKind::AzureDevOpsServer => "azure-devops-server",
            ProviderKind::Gitea => "gitea",
            ProviderKind::GitWeb => "gitweb",
        }
    }

    pub fn provider(&self) -> &'static dyn Provider {
        match self {
            ProviderKind::GitHub => &GitHub,
            ProviderKind::GitLab => &GitLab,
            ProviderKind::Bitbucket => &Bitbucket,
            ProviderKind::AzureRepos => &AzureRepos,
            ProviderKind::AzureDevOpsServer => &AzureDevOpsServer,
            ProviderKind::Gitea => &Gitea,
            ProviderKind::GitWeb => &GitWeb,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::GitHub => "GitHub",
            ProviderKind::GitLab => "GitLab",
            ProviderKind::Bitbucket => "Bitbucket",
            ProviderKind::AzureRepos => "Azure Repos",
            ProviderKind::AzureDevOpsServer => "Azure DevOps Server",
            ProviderKind::Gitea => "Gitea",
            ProviderKind::GitWeb => "GitWeb",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        if value == "tfs" {
            return Ok(ProviderKind::AzureDevOpsServer);
        }
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.id() == value)
            .ok_or_else(|| format!("unknown provider '{}'", value))
    }
}

/// A hosting provider: its repository url grammar, the shape of its raw
/// content urls, and how its ssh remotes translate to https.
pub trait Provider: Sync {
    fn kind(&self) -> ProviderKind;

    /// Hosts the provider knows about without any declaration.
    fn default_hosts(&self) -> Vec<HostMapping> {
        vec![]
    }

    /// Checks the provider specific attributes of a declared host.
    fn validate_host(&self, _declaration: &HostMapping) -> Result<(), SourceLinkError> {
        Ok(())
    }

    /// The content url used when a host does not declare one. `host` is the
    /// declared (or implicit) host, `repository` the remote being resolved.
    fn default_content_url(
        &self,
        host: &Authority,
        declaration: Option<&HostMapping>,
        repository: &Url,
    ) -> Result<Url, SourceLinkError>;

    /// Parses the repository path (safe-unescaped, no `.git` suffix) of a
    /// remote matched to this provider.
    fn parse_relative_path(
        &self,
        repository: &Url,
        relative_url: &str,
        declaration: Option<&HostMapping>,
    ) -> Option<ParsedRepositoryPath>;

    /// Builds the content url template, with a single `*` wildcard.
    fn build_content_url(
        &self,
        content: &Url,
        repository: &Url,
        path: &ParsedRepositoryPath,
        revision_id: &str,
        declaration: Option<&HostMapping>,
    ) -> Result<String, SourceLinkError>;

    /// `Ok(None)` leaves the url unchanged.
    fn translate_ssh_url(
        &self,
        url: &Url,
        _declaration: Option<&HostMapping>,
    ) -> Result<Option<String>, SourceLinkError> {
        Ok(Some(https_url(url)))
    }

    fn translate_git_url(
        &self,
        url: &Url,
        _declaration: Option<&HostMapping>,
    ) -> Result<Option<String>, SourceLinkError> {
        Ok(Some(https_url(url)))
    }

    fn translate_http_url(
        &self,
        _url: &Url,
        _declaration: Option<&HostMapping>,
    ) -> Result<Option<String>, SourceLinkError> {
        Ok(None)
    }
}

/// `https://{host}{path_and_query}`, dropping user, password and port.
pub(crate) fn https_url(url: &Url) -> String {
    format!(
        "https://{}{}",
        url.host_str().unwrap_or_default(),
        path_and_query(url)
    )
}

/// Content urls keep `http` only for repositories served over `http`.
pub(crate) fn content_scheme(repository: &Url) -> &'static str {
    if repository.scheme().eq_ignore_ascii_case("http") {
        "http"
    } else {
        "https"
    }
}

pub(crate) fn content_url_from(
    scheme: &str,
    authority: &Authority,
    path: &str,
) -> Result<Url, SourceLinkError> {
    let value = format!("{}://{}{}", scheme, authority, path);
    Url::parse(&value).map_err(|_| SourceLinkError::InvalidContentUrl {
        host: authority.to_string(),
        url: value,
    })
}

/// Whether a declared content url already ends with the server base path.
pub(crate) fn has_base_path(content: &Url, base_path: &str) -> bool {
    base_path.is_empty()
        || content
            .path()
            .trim_end_matches('/')
            .ends_with(&format!("/{}", base_path))
}

/// Splits the repository path of an unstructured provider, which must hold
/// at least one segment.
pub(crate) fn parse_repository_path(relative_url: &str) -> Option<ParsedRepositoryPath> {
    let segments = crate::internal::uri::split_path(relative_url)?;
    if segments.is_empty() {
        return None;
    }
    Some(ParsedRepositoryPath::repository(segments.join("/")))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
