use url::Url;

use crate::internal::errors::SourceLinkError;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::content_url_from;
use crate::internal::providers::parse_repository_path;
use crate::internal::providers::ParsedRepositoryPath;
use crate::internal::providers::Provider;
use crate::internal::providers::ProviderKind;
use crate::internal::uri::combine;
use crate::internal::uri::Authority;

/// GitWeb front ends. These hosts only offer ssh clone access, so remotes
/// are kept as ssh urls and other transports are refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitWeb;

impl GitWeb {
    fn unsupported(&self, url: &Url) -> SourceLinkError {
        SourceLinkError::UnsupportedTransport {
            provider: self.kind(),
            scheme: url.scheme().to_string(),
            url: url.to_string(),
        }
    }
}

impl Provider for GitWeb {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitWeb
    }

    fn default_content_url(
        &self,
        host: &Authority,
        _declaration: Option<&HostMapping>,
        _repository: &Url,
    ) -> Result<Url, SourceLinkError> {
        content_url_from("https", host, "/gitweb")
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
            content.as_str(),
            &format!(
                "?p={}.git;a=blob_plain;hb={};f=*",
                path.repository_name, revision_id
            ),
        ))
    }

    fn translate_ssh_url(
        &self,
        _url: &Url,
        _declaration: Option<&HostMapping>,
    ) -> Result<Option<String>, SourceLinkError> {
        Ok(None)
    }

    fn translate_git_url(
        &self,
        url: &Url,
        _declaration: Option<&HostMapping>,
    ) -> Result<Option<String>, SourceLinkError> {
        Err(self.unsupported(url))
    }

    fn translate_http_url(
        &self,
        url: &Url,
        _declaration: Option<&HostMapping>,
    ) -> Result<Option<String>, SourceLinkError> {
        Err(self.unsupported(url))
    }
}

#[cfg(test)]
#[path = "gitweb_test.rs"]
mod tests;
