use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::internal::errors::SourceLinkError;
use crate::internal::providers::Provider;
use crate::internal::uri::parse_authority;
use crate::internal::uri::url_authority;
use crate::internal::uri::Authority;
use crate::sourcelink_debug;

/// A host declared for a provider, with its optional content url and the
/// provider specific attributes.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HostMapping {
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    /// Azure DevOps Server: the path the server is rooted at, e.g. `tfs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_directory: Option<String>,
    /// Bitbucket: Server/Data Center rather than bitbucket.org.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise_edition: Option<bool>,
    /// GitLab and Bitbucket: the server version, selects the url shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HostMapping {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_content_url(mut self, content_url: impl Into<String>) -> Self {
        self.content_url = Some(content_url.into());
        self
    }

    pub fn with_virtual_directory(mut self, virtual_directory: impl Into<String>) -> Self {
        self.virtual_directory = Some(virtual_directory.into());
        self
    }

    pub fn with_enterprise_edition(mut self, enterprise_edition: bool) -> Self {
        self.enterprise_edition = Some(enterprise_edition);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn authority(&self) -> Result<Authority, SourceLinkError> {
        parse_authority(self.host.trim())
            .ok_or_else(|| SourceLinkError::InvalidHost(self.host.clone()))
    }

    /// The declared content url, if any; an empty value counts as none.
    pub fn declared_content_url(&self) -> Option<&str> {
        self.content_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// A host mapping resolved against a repository: the host to match and the
/// content url it leads to.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlMapping<'a> {
    pub host: Authority,
    pub content_url: Url,
    pub has_default_content_url: bool,
    /// `None` for the implicit mapping.
    pub declaration: Option<&'a HostMapping>,
}

impl UrlMapping<'_> {
    pub fn is_implicit(&self) -> bool {
        self.declaration.is_none()
    }
}

/// Checks every declared host: its authority, its content url and the
/// provider specific attributes. None of these depend on the repository.
pub fn validate_hosts(
    provider: &dyn Provider,
    hosts: &[HostMapping],
) -> Result<(), SourceLinkError> {
    for declaration in hosts {
        declaration.authority()?;
        provider.validate_host(declaration)?;
        declared_content_url(declaration)?;
    }
    Ok(())
}

fn declared_content_url(declaration: &HostMapping) -> Result<Option<Url>, SourceLinkError> {
    declaration
        .declared_content_url()
        .map(|url| {
            parse_content_url(url).ok_or_else(|| SourceLinkError::InvalidContentUrl {
                host: declaration.host.clone(),
                url: url.to_string(),
            })
        })
        .transpose()
}

/// Builds the candidate mappings for `repository`: every declared host in
/// order, then the implicit host of `implicit_repository` when given.
pub fn url_mappings<'a>(
    provider: &dyn Provider,
    hosts: &'a [HostMapping],
    implicit_repository: Option<&Url>,
    repository: &Url,
) -> Result<Vec<UrlMapping<'a>>, SourceLinkError> {
    let mut mappings = Vec::with_capacity(hosts.len() + 1);

    for declaration in hosts {
        let host = declaration.authority()?;
        provider.validate_host(declaration)?;

        let (content_url, has_default_content_url) = match declared_content_url(declaration)? {
            Some(url) => (url, false),
            None => (
                provider.default_content_url(&host, Some(declaration), repository)?,
                true,
            ),
        };

        mappings.push(UrlMapping {
            host,
            content_url,
            has_default_content_url,
            declaration: Some(declaration),
        });
    }

    if let Some(implicit_repository) = implicit_repository {
        if let Some(host) = url_authority(implicit_repository) {
            let content_url = provider.default_content_url(&host, None, implicit_repository)?;
            sourcelink_debug!(format!(
                "implicit host '{}' with content url '{}'",
                host, content_url
            ));
            mappings.push(UrlMapping {
                host,
                content_url,
                has_default_content_url: true,
                declaration: None,
            });
        }
    }

    Ok(mappings)
}

fn parse_content_url(value: &str) -> Option<Url> {
    let url = Url::parse(value).ok()?;
    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return None;
    }
    Some(url)
}

/// Selects the mapping for `target`:
/// exact host and port, then exact host without port, then subdomain with
/// port, then subdomain without port. Earlier candidates win ties.
pub fn find_matching_mapping<'m, 'a>(
    mappings: &'m [UrlMapping<'a>],
    target: &Url,
) -> Option<&'m UrlMapping<'a>> {
    let host = target.host_str()?;
    let port = target.port_or_known_default();

    let mut fallback = None;
    for mapping in mappings.iter().filter(|m| m.host.is_host(host)) {
        if mapping.host.port().is_some() && mapping.host.port() == port {
            return Some(mapping);
        }
        if mapping.host.port().is_none() && fallback.is_none() {
            fallback = Some(mapping);
        }
    }

    if fallback.is_none() {
        for mapping in mappings.iter().filter(|m| m.host.is_parent_domain_of(host)) {
            if mapping.host.port().is_some() && mapping.host.port() == port {
                return Some(mapping);
            }
            if mapping.host.port().is_none() && fallback.is_none() {
                fallback = Some(mapping);
            }
        }
    }

    fallback
}

/// The content url to use for `target` once `mapping` matched it. A
/// defaulted content url of a mapping without port takes the non-default
/// port of an http(s) target.
pub fn matched_content_url(
    mapping: &UrlMapping<'_>,
    target: &Url,
) -> Result<Url, SourceLinkError> {
    let mut content_url = mapping.content_url.clone();

    let web_target = matches!(target.scheme(), "http" | "https");
    if mapping.has_default_content_url && mapping.host.port().is_none() && web_target {
        if let Some(port) = target.port() {
            content_url
                .set_port(Some(port))
                .map_err(|_| SourceLinkError::InvalidContentUrl {
                    host: mapping.host.to_string(),
                    url: mapping.content_url.to_string(),
                })?;
        }
    }

    Ok(content_url)
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
