use url::Url;

use crate::internal::errors::SourceLinkError;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::content_scheme;
use crate::internal::providers::content_url_from;
use crate::internal::providers::parse_repository_path;
use crate::internal::providers::version::declared_version;
use crate::internal::providers::ParsedRepositoryPath;
use crate::internal::providers::Provider;
use crate::internal::providers::ProviderKind;
use crate::internal::uri::combine;
use crate::internal::uri::Authority;

const GITLAB_HOST: &str = "gitlab.com";

/// GitLab 12.0 moved raw files under the `-/` scope.
const SCOPED_RAW_VERSION: (u64, u64) = (12, 0);

/// gitlab.com and self-managed GitLab.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitLab;

impl Provider for GitLab {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitLab
    }

    fn default_hosts(&self) -> Vec<HostMapping> {
        vec![HostMapping::new(GITLAB_HOST)]
    }

    fn default_content_url(
        &self,
        host: &Authority,
        _declaration: Option<&HostMapping>,
        repository: &Url,
    ) -> Result<Url, SourceLinkError> {
        content_url_from(content_scheme(repository), host, "")
    }

    fn parse_relative_path(
        &self,
        _repository: &Url,
        relative_url: &str,
        _declaration: Option<&HostMapping>,
    ) -> Option<ParsedRepositoryPath> {
        parse_repository_path(relative_url)
    }

    fn build_content_url(
        &self,
        content: &Url,
        _repository: &Url,
        path: &ParsedRepositoryPath,
        revision_id: &str,
        declaration: Option<&HostMapping>,
    ) -> Result<String, SourceLinkError> {
        let scoped = match declared_version(declaration)? {
            Some(version) => version.at_least(SCOPED_RAW_VERSION.0, SCOPED_RAW_VERSION.1),
            None => true,
        };

        let raw = if scoped {
            format!("-/raw/{}/*", revision_id)
        } else {
            format!("raw/{}/*", revision_id)
        };

        Ok(combine(
            &combine(content.as_str(), &path.repository_name),
            &raw,
        ))
    }
}

#[cfg(test)]
#[path = "gitlab_test.rs"]
mod tests;
