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

const GITHUB_HOST: &str = "github.com";
const GITHUB_CONTENT_URL: &str = "https://raw.githubusercontent.com";

/// github.com and GitHub Enterprise Server.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHub;

impl Provider for GitHub {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitHub
    }

    fn default_hosts(&self) -> Vec<HostMapping> {
        vec![HostMapping::new(GITHUB_HOST).with_content_url(GITHUB_CONTENT_URL)]
    }

    fn default_content_url(
        &self,
        host: &Authority,
        _declaration: Option<&HostMapping>,
        repository: &Url,
    ) -> Result<Url, SourceLinkError> {
        if host.is_host(GITHUB_HOST) && host.port().is_none() {
            return content_url_from("https", &Authority::new("raw.githubusercontent.com", None), "");
        }

        // Enterprise servers serve raw files under /raw on the same host
        content_url_from(content_scheme(repository), host, "/raw")
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
            &format!("{}/*", revision_id),
        ))
    }
}

#[cfg(test)]
#[path = "github_test.rs"]
mod tests;
