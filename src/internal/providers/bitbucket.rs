use url::Url;

use crate::internal::errors::SourceLinkError;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::content_scheme;
use crate::internal::providers::content_url_from;
use crate::internal::providers::has_base_path;
use crate::internal::providers::version::declared_version;
use crate::internal::providers::ParsedRepositoryPath;
use crate::internal::providers::Provider;
use crate::internal::providers::ProviderKind;
use crate::internal::uri::combine;
use crate::internal::uri::path_and_query;
use crate::internal::uri::split_path;
use crate::internal::uri::Authority;

const BITBUCKET_CLOUD_HOST: &str = "bitbucket.org";
const BITBUCKET_CLOUD_CONTENT_URL: &str = "https://api.bitbucket.org/2.0/repositories";

/// Marks http clone urls of Bitbucket Server, `{base}/scm/{project}/{repo}`.
const SCM_MARKER: &str = "scm";

/// Bitbucket Server 4.7 added the `raw` endpoint.
const RAW_ENDPOINT_VERSION: (u64, u64) = (4, 7);

/// bitbucket.org and Bitbucket Server / Data Center.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bitbucket;

impl Bitbucket {
    /// Hosts are enterprise unless declared otherwise or being bitbucket.org.
    fn is_enterprise(host: &str, declaration: Option<&HostMapping>) -> bool {
        declaration
            .and_then(|declaration| declaration.enterprise_edition)
            .unwrap_or_else(|| !host.eq_ignore_ascii_case(BITBUCKET_CLOUD_HOST))
    }
}

impl Provider for Bitbucket {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Bitbucket
    }

    fn default_hosts(&self) -> Vec<HostMapping> {
        vec![HostMapping::new(BITBUCKET_CLOUD_HOST)]
    }

    fn default_content_url(
        &self,
        host: &Authority,
        declaration: Option<&HostMapping>,
        repository: &Url,
    ) -> Result<Url, SourceLinkError> {
        if Self::is_enterprise(host.host(), declaration) {
            return content_url_from(content_scheme(repository), host, "");
        }

        Url::parse(BITBUCKET_CLOUD_CONTENT_URL).map_err(|_| SourceLinkError::InvalidContentUrl {
            host: host.to_string(),
            url: BITBUCKET_CLOUD_CONTENT_URL.to_string(),
        })
    }

    /// `[{base}/][scm/]{project}/{repo}`, read from the right: the last two
    /// segments are the project and repository, an `scm` segment before them
    /// is dropped, and anything further left is the server's base path.
    fn parse_relative_path(
        &self,
        _repository: &Url,
        relative_url: &str,
        _declaration: Option<&HostMapping>,
    ) -> Option<ParsedRepositoryPath> {
        let segments = split_path(relative_url)?;
        let [base @ .., project, repository] = segments.as_slice() else {
            return None;
        };

        let base = match base {
            [head @ .., marker] if marker.eq_ignore_ascii_case(SCM_MARKER) => head,
            _ => base,
        };

        Some(ParsedRepositoryPath {
            base_path: base.iter().map(|segment| segment.to_string()).collect(),
            project: Some(project.to_string()),
            repository_name: repository.to_string(),
            ..Default::default()
        })
    }

    fn build_content_url(
        &self,
        content: &Url,
        repository: &Url,
        path: &ParsedRepositoryPath,
        revision_id: &str,
        declaration: Option<&HostMapping>,
    ) -> Result<String, SourceLinkError> {
        let project = path.project_or_repository();

        if !Self::is_enterprise(repository.host_str().unwrap_or_default(), declaration) {
            return Ok(combine(
                &combine(
                    content.as_str(),
                    &format!("{}/{}", project, path.repository_name),
                ),
                &format!("src/{}/*", revision_id),
            ));
        }

        let raw_endpoint = match declared_version(declaration)? {
            Some(version) => version.at_least(RAW_ENDPOINT_VERSION.0, RAW_ENDPOINT_VERSION.1),
            None => true,
        };

        // A declared content url may already carry the base path
        let base_path = path.base_path();
        let server_url = if has_base_path(content, &base_path) {
            content.as_str().to_string()
        } else {
            combine(content.as_str(), &base_path)
        };

        let repository_url = combine(
            &server_url,
            &format!("projects/{}/repos/{}", project, path.repository_name),
        );

        Ok(if raw_endpoint {
            combine(&repository_url, &format!("raw/*?at={}", revision_id))
        } else {
            combine(&repository_url, &format!("browse/*?at={}&raw", revision_id))
        })
    }

    /// Server ssh remotes (`ssh://git@host:7999/{project}/{repo}`) are
    /// served over https under `scm/`, below the base path of the declared
    /// content url when there is one.
    fn translate_ssh_url(
        &self,
        url: &Url,
        declaration: Option<&HostMapping>,
    ) -> Result<Option<String>, SourceLinkError> {
        let host = url.host_str().unwrap_or_default();
        let path = path_and_query(url);

        if !Self::is_enterprise(host, declaration) {
            return Ok(Some(format!("https://{}{}", host, path)));
        }

        let base = declaration
            .and_then(HostMapping::declared_content_url)
            .and_then(|content_url| Url::parse(content_url).ok())
            .filter(|content_url| content_url.path() != "/" && !content_url.path().is_empty())
            .map(|content_url| content_url.as_str().to_string())
            .unwrap_or_else(|| format!("https://{}", host));

        Ok(Some(combine(&combine(&base, SCM_MARKER), &path)))
    }
}

#[cfg(test)]
#[path = "bitbucket_test.rs"]
mod tests;
