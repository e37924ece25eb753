use std::fmt;

use url::Url;

use crate::internal::errors::BatchError;
use crate::internal::errors::SourceLinkError;
use crate::internal::mapping::find_matching_mapping;
use crate::internal::mapping::matched_content_url;
use crate::internal::mapping::url_mappings;
use crate::internal::mapping::validate_hosts;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::Provider;
use crate::internal::source_root::RepositoryRoot;
use crate::internal::source_root::NOT_APPLICABLE;
use crate::internal::uri::is_git_revision;
use crate::internal::uri::normalize_remote_url;
use crate::internal::uri::repository_relative_url;
use crate::internal::user_interface::StringColor;
use crate::sourcelink_debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLinkUrl {
    Url(String),
    NotApplicable,
}

impl fmt::Display for SourceLinkUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLinkUrl::Url(url) => write!(f, "{}", url),
            SourceLinkUrl::NotApplicable => write!(f, "{}", NOT_APPLICABLE),
        }
    }
}

/// What one provider resolves against: its hosts, and the project
/// repository url the implicit host derives from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveContext<'a> {
    pub hosts: &'a [HostMapping],
    pub repository_url: Option<&'a str>,
    /// The implicit host is only added when a single provider is in use.
    pub is_single_provider: bool,
}

impl<'a> ResolveContext<'a> {
    pub fn new(hosts: &'a [HostMapping]) -> Self {
        Self {
            hosts,
            ..Default::default()
        }
    }

    pub fn with_repository_url(
        mut self,
        repository_url: Option<&'a str>,
        is_single_provider: bool,
    ) -> Self {
        self.repository_url = repository_url;
        self.is_single_provider = is_single_provider;
        self
    }

    /// The project repository, when it yields an implicit host.
    pub fn implicit_repository(&self) -> Option<Url> {
        if !self.is_single_provider {
            return None;
        }

        let repository_url = self.repository_url?.trim();
        if repository_url.is_empty() {
            return None;
        }

        match parse_repository_url(repository_url) {
            Ok(url) => Some(url),
            Err(_) => {
                sourcelink_debug!(format!(
                    "no implicit host: '{}' is not an absolute url",
                    repository_url
                ));
                None
            }
        }
    }
}

/// Parses a remote, SCP forms included, into an absolute url with a host.
pub fn parse_repository_url(value: &str) -> Result<Url, SourceLinkError> {
    let url = Url::parse(&normalize_remote_url(value))
        .map_err(|_| SourceLinkError::InvalidRepositoryUrl(value.to_string()))?;

    if url.host_str().is_none_or(str::is_empty) {
        return Err(SourceLinkError::InvalidRepositoryUrl(value.to_string()));
    }

    Ok(url)
}

/// Resolves the content url template of `root` for `provider`.
///
/// Roots that are not git roots, that already carry a url, or whose remote
/// matches none of the hosts are not applicable. A matched root with a bad
/// revision or an unknown path shape is an error, as is a git root without
/// a usable remote.
pub fn resolve_source_link_url(
    provider: &dyn Provider,
    root: &RepositoryRoot,
    context: &ResolveContext<'_>,
) -> Result<SourceLinkUrl, SourceLinkError> {
    if !root.is_git() {
        sourcelink_debug!(format!(
            "{}: not a git root ({})",
            root.path, root.source_control
        ));
        return Ok(SourceLinkUrl::NotApplicable);
    }

    if root.is_resolved() {
        return Ok(SourceLinkUrl::NotApplicable);
    }

    let remote = root
        .remote_url()
        .ok_or_else(|| SourceLinkError::MissingRepositoryUrl(root.path.clone()))?;
    let repository = parse_repository_url(remote)?;

    let implicit_repository = context.implicit_repository();
    let mappings = url_mappings(
        provider,
        context.hosts,
        implicit_repository.as_ref(),
        &repository,
    )?;

    let Some(mapping) = find_matching_mapping(&mappings, &repository) else {
        sourcelink_debug!(format!(
            "{}: {} does not match any {} host",
            root.path,
            remote,
            provider.kind()
        ));
        return Ok(SourceLinkUrl::NotApplicable);
    };

    let revision_id = root
        .revision_id
        .as_deref()
        .map(str::trim)
        .filter(|revision_id| !revision_id.is_empty())
        .ok_or_else(|| SourceLinkError::MissingRevisionId(root.path.clone()))?;
    if !is_git_revision(revision_id) {
        return Err(SourceLinkError::InvalidRevisionId(revision_id.to_string()));
    }

    if mapping.is_implicit() {
        sourcelink_debug!(format!(
            "{}: matched the implicit host {}",
            root.path, mapping.host
        ));
    }

    let content_url = matched_content_url(mapping, &repository)?;
    let relative_url = repository_relative_url(&repository);
    let path = provider
        .parse_relative_path(&repository, &relative_url, mapping.declaration)
        .ok_or_else(|| SourceLinkError::UnrecognizedRepositoryPath {
            provider: provider.kind(),
            url: remote.to_string(),
        })?;

    let url = provider.build_content_url(
        &content_url,
        &repository,
        &path,
        revision_id,
        mapping.declaration,
    )?;
    sourcelink_debug!(format!(
        "{}: {} ({})",
        root.path,
        url.light_blue(),
        provider.kind()
    ));

    Ok(SourceLinkUrl::Url(url))
}

/// Resolves every root, attaching the urls found. Errors are collected per
/// root and do not stop the others; an invalid host declaration is reported
/// once and resolves nothing.
pub fn resolve_source_roots(
    provider: &dyn Provider,
    roots: &mut [RepositoryRoot],
    context: &ResolveContext<'_>,
) -> Result<usize, BatchError> {
    let mut errors = BatchError::new();
    let mut resolved = 0;

    if let Err(err) = validate_hosts(provider, context.hosts) {
        errors.push(provider.kind().to_string(), err);
        return Err(errors);
    }

    for root in roots.iter_mut() {
        match resolve_source_link_url(provider, root, context) {
            Ok(SourceLinkUrl::Url(url)) => {
                root.source_link_url = Some(url);
                resolved += 1;
            }
            Ok(SourceLinkUrl::NotApplicable) => {}
            Err(err) => errors.push(root.path.clone(), err),
        }
    }

    errors.into_result(resolved)
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
