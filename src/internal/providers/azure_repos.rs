use url::Url;

use crate::internal::errors::SourceLinkError;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::content_url_from;
use crate::internal::providers::grammar::PathShape;
use crate::internal::providers::grammar::SegmentPrefix;
use crate::internal::providers::grammar::GIT_MARKER;
use crate::internal::providers::grammar::SSH_MARKER;
use crate::internal::providers::ParsedRepositoryPath;
use crate::internal::providers::Provider;
use crate::internal::providers::ProviderKind;
use crate::internal::uri::combine;
use crate::internal::uri::safe_unescape;
use crate::internal::uri::split_path;
use crate::internal::uri::url_authority;
use crate::internal::uri::Authority;

const DEV_AZURE_HOST: &str = "dev.azure.com";
const VISUAL_STUDIO_DOMAIN: &str = "visualstudio.com";
const DEFAULT_COLLECTION: &str = "DefaultCollection";

const VISUAL_STUDIO_SSH_PREFIX: &str = "vs-ssh.";
const SSH_PREFIX: &str = "ssh.";
const SSH_ACCOUNT_MARKER: &str = "v3";

/// `{account}.visualstudio.com/[DefaultCollection/]{project}[/{team}]/_git/{repo}`
const VISUAL_STUDIO_HTTP: PathShape<'static> = PathShape {
    prefix: SegmentPrefix::OptionalCollection(DEFAULT_COLLECTION),
    marker: Some(GIT_MARKER),
};

/// `dev.azure.com/{account}/{project}[/{team}]/_git/{repo}`
const DEV_AZURE_HTTP: PathShape<'static> = PathShape {
    prefix: SegmentPrefix::Account,
    marker: Some(GIT_MARKER),
};

/// `{account}@vs-ssh.visualstudio.com/[DefaultCollection/]{project}[/{team}]/_ssh/{repo}`
const VISUAL_STUDIO_SSH: PathShape<'static> = PathShape {
    prefix: SegmentPrefix::OptionalCollection(DEFAULT_COLLECTION),
    marker: Some(SSH_MARKER),
};

/// `ssh.dev.azure.com/v3/{account}/{project}[/{team}]/{repo}`
const DEV_AZURE_SSH: PathShape<'static> = PathShape {
    prefix: SegmentPrefix::MarkedAccount(SSH_ACCOUNT_MARKER),
    marker: None,
};

/// Azure Repos in Azure DevOps Services, on both dev.azure.com and the
/// older `{account}.visualstudio.com` hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AzureRepos;

fn is_visual_studio_host(host: &str) -> bool {
    Authority::new(VISUAL_STUDIO_DOMAIN, None).is_parent_domain_of(host)
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    if value.len() > prefix.len()
        && value.is_char_boundary(prefix.len())
        && value[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&value[prefix.len()..])
    } else {
        None
    }
}

/// Joins the present, non-empty components with `/`.
fn join_present(components: &[Option<&str>]) -> String {
    components
        .iter()
        .flatten()
        .filter(|component| !component.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}

/// The Git items API url shared by Azure DevOps Services and Server.
pub(crate) fn items_url(
    content: &Url,
    project_path: &str,
    repository_name: &str,
    revision_id: &str,
) -> String {
    let items = combine(
        &combine(content.as_str(), project_path),
        &format!("_apis/git/repositories/{}/items", repository_name),
    );
    format!(
        "{}?api-version=1.0&versionType=commit&version={}&path=/*",
        items, revision_id
    )
}

impl Provider for AzureRepos {
    fn kind(&self) -> ProviderKind {
        ProviderKind::AzureRepos
    }

    fn default_hosts(&self) -> Vec<HostMapping> {
        vec![
            HostMapping::new(DEV_AZURE_HOST),
            HostMapping::new(VISUAL_STUDIO_DOMAIN),
        ]
    }

    /// Content is served by the repository's own host, which for
    /// `{account}.visualstudio.com` differs from the declared domain.
    fn default_content_url(
        &self,
        _host: &Authority,
        _declaration: Option<&HostMapping>,
        repository: &Url,
    ) -> Result<Url, SourceLinkError> {
        let authority = url_authority(repository)
            .ok_or_else(|| SourceLinkError::InvalidRepositoryUrl(repository.to_string()))?;
        content_url_from("https", &authority, "")
    }

    fn parse_relative_path(
        &self,
        repository: &Url,
        relative_url: &str,
        _declaration: Option<&HostMapping>,
    ) -> Option<ParsedRepositoryPath> {
        let host = repository.host_str()?;
        let segments = split_path(relative_url)?;

        if is_visual_studio_host(host) {
            let account = host.split('.').next()?;
            let mut parsed = VISUAL_STUDIO_HTTP.parse(&segments)?;
            parsed.account = Some(account.to_string());
            return Some(parsed);
        }

        DEV_AZURE_HTTP.parse(&segments)
    }

    fn build_content_url(
        &self,
        content: &Url,
        repository: &Url,
        path: &ParsedRepositoryPath,
        revision_id: &str,
        _declaration: Option<&HostMapping>,
    ) -> Result<String, SourceLinkError> {
        let project = path.project_or_repository();
        let host = repository.host_str().unwrap_or_default();

        // The account of visualstudio.com repositories is part of the host
        let project_path = if is_visual_studio_host(host) {
            project.to_string()
        } else {
            join_present(&[path.account.as_deref(), Some(project)])
        };

        Ok(items_url(
            content,
            &project_path,
            &path.repository_name,
            revision_id,
        ))
    }

    fn translate_ssh_url(
        &self,
        url: &Url,
        _declaration: Option<&HostMapping>,
    ) -> Result<Option<String>, SourceLinkError> {
        let host = url.host_str().unwrap_or_default();
        let visual_studio = is_visual_studio_host(host);
        let prefix = if visual_studio {
            VISUAL_STUDIO_SSH_PREFIX
        } else {
            SSH_PREFIX
        };

        let Some(host_name) = strip_prefix_ignore_case(host, prefix) else {
            return Ok(None);
        };

        let path = safe_unescape(url.path());
        let Some(segments) = split_path(&path) else {
            return Ok(None);
        };

        if visual_studio {
            let account = safe_unescape(url.username());
            if account.is_empty() {
                return Ok(None);
            }
            let Some(parsed) = VISUAL_STUDIO_SSH.parse(&segments) else {
                return Ok(None);
            };

            let repository_path = join_present(&[
                parsed.collection.as_deref(),
                parsed.project_and_team().as_deref(),
                Some(GIT_MARKER),
                Some(&parsed.repository_name),
            ]);
            return Ok(Some(format!(
                "https://{}.{}/{}",
                account,
                host_name.to_ascii_lowercase(),
                repository_path
            )));
        }

        let Some(parsed) = DEV_AZURE_SSH.parse(&segments) else {
            return Ok(None);
        };

        let repository_path = join_present(&[
            parsed.account.as_deref(),
            parsed.project_and_team().as_deref(),
            Some(GIT_MARKER),
            Some(&parsed.repository_name),
        ]);
        Ok(Some(format!(
            "https://{}/{}",
            host_name.to_ascii_lowercase(),
            repository_path
        )))
    }
}

#[cfg(test)]
#[path = "azure_repos_test.rs"]
mod tests;
