use url::Url;

use crate::internal::errors::SourceLinkError;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::content_scheme;
use crate::internal::providers::content_url_from;
use crate::internal::providers::parse_repository_path;
use crate::internal::providers::ParsedRepositoryPath;
use crate::internal::providers::Provider;
use crate::internal::providers::ProviderKind;
use crate::internal::uri::combine;
use crate::internal::uri::Authority;

/// Gitea (and Forgejo) servers. There is no well-known public host, so
/// every host is declared or implicit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gitea;

impl Provider for Gitea {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gitea
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
        _declaration: Option<&HostMapping>,
    ) -> Result<String, SourceLinkError> {
        Ok(combine(
            &combine(content.as_str(), &path.repository_name),
            &format!("raw/commit/{}/*", revision_id),
        ))
    }
}

#[cfg(test)]
#[path = "gitea_test.rs"]
mod tests;
