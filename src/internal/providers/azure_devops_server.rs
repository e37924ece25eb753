use url::Url;

use crate::internal::errors::SourceLinkError;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::azure_repos::items_url;
use crate::internal::providers::content_scheme;
use crate::internal::providers::content_url_from;
use crate::internal::providers::grammar::split_repository_tail;
use crate::internal::providers::grammar::PathShape;
use crate::internal::providers::grammar::SegmentPrefix;
use crate::internal::providers::grammar::GIT_MARKER;
use crate::internal::providers::grammar::SSH_MARKER;
use crate::internal::providers::has_base_path;
use crate::internal::providers::ParsedRepositoryPath;
use crate::internal::providers::Provider;
use crate::internal::providers::ProviderKind;
use crate::internal::uri::safe_unescape;
use crate::internal::uri::split_path;
use crate::internal::uri::url_authority;
use crate::internal::uri::Authority;

/// Azure DevOps Server (formerly Team Foundation Server), installed on
/// premises below a virtual directory:
/// `{host}/{virtual_directory}/{collection}/[{project}[/{team}]/]_git/{repo}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AzureDevOpsServer;

impl AzureDevOpsServer {
    /// The declared virtual directory split in segments; `/` is the root.
    /// The implicit host has no declaration and is taken as rooted.
    fn virtual_directory(declaration: Option<&HostMapping>) -> Vec<&str> {
        declaration
            .and_then(|declaration| declaration.virtual_directory.as_deref())
            .map(|virtual_directory| {
                virtual_directory
                    .split('/')
                    .filter(|segment| !segment.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Provider for AzureDevOpsServer {
    fn kind(&self) -> ProviderKind {
        ProviderKind::AzureDevOpsServer
    }

    fn validate_host(&self, declaration: &HostMapping) -> Result<(), SourceLinkError> {
        match declaration.virtual_directory.as_deref().map(str::trim) {
            Some(virtual_directory) if !virtual_directory.is_empty() => Ok(()),
            _ => Err(SourceLinkError::MissingHostAttribute {
                provider: self.kind(),
                host: declaration.host.clone(),
                attribute: "virtual_directory",
            }),
        }
    }

    fn default_content_url(
        &self,
        host: &Authority,
        _declaration: Option<&HostMapping>,
        repository: &Url,
    ) -> Result<Url, SourceLinkError> {
        let authority = url_authority(repository).unwrap_or_else(|| host.clone());
        content_url_from(content_scheme(repository), &authority, "")
    }

    fn parse_relative_path(
        &self,
        _repository: &Url,
        relative_url: &str,
        declaration: Option<&HostMapping>,
    ) -> Option<ParsedRepositoryPath> {
        let segments = split_path(relative_url)?;
        let virtual_directory = Self::virtual_directory(declaration);

        PathShape::new(
            SegmentPrefix::VirtualDirectory(&virtual_directory),
            Some(GIT_MARKER),
        )
        .parse(&segments)
    }

    fn build_content_url(
        &self,
        content: &Url,
        _repository: &Url,
        path: &ParsedRepositoryPath,
        revision_id: &str,
        _declaration: Option<&HostMapping>,
    ) -> Result<String, SourceLinkError> {
        let base_path = path.base_path();

        // A declared content url may already point at the virtual directory
        let mut components = vec![];
        if !has_base_path(content, &base_path) {
            components.push(base_path.as_str());
        }
        components.extend(path.collection.as_deref());
        components.push(path.project_or_repository());

        let project_path = components
            .into_iter()
            .filter(|component| !component.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        Ok(items_url(
            content,
            &project_path,
            &path.repository_name,
            revision_id,
        ))
    }

    /// `ssh://{host}:22/{virtual_directory}/{collection}/[{project}/]_ssh/{repo}`
    /// is served at the same path with `_git`.
    fn translate_ssh_url(
        &self,
        url: &Url,
        _declaration: Option<&HostMapping>,
    ) -> Result<Option<String>, SourceLinkError> {
        let path = safe_unescape(url.path());
        let Some(segments) = split_path(&path) else {
            return Ok(None);
        };
        let Some((leading, repository_name)) = split_repository_tail(&segments, Some(SSH_MARKER))
        else {
            return Ok(None);
        };
        if leading.is_empty() {
            return Ok(None);
        }

        Ok(Some(format!(
            "https://{}/{}/{}/{}",
            url.host_str().unwrap_or_default(),
            leading.join("/"),
            GIT_MARKER,
            repository_name
        )))
    }
}

#[cfg(test)]
#[path = "azure_devops_server_test.rs"]
mod tests;
