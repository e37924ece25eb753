use url::Url;

use crate::internal::errors::BatchError;
use crate::internal::errors::SourceLinkError;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::Provider;
use crate::internal::resolve::ResolveContext;
use crate::internal::source_root::RepositoryRoot;
use crate::internal::uri::normalize_remote_url;
use crate::internal::uri::url_authority;
use crate::internal::uri::Authority;
use crate::sourcelink_debug;

/// A host a remote may be translated for. The implicit host carries no
/// declaration.
struct TranslationHost<'a> {
    authority: Authority,
    declaration: Option<&'a HostMapping>,
}

fn translation_hosts<'a>(
    context: &ResolveContext<'a>,
) -> Result<Vec<TranslationHost<'a>>, SourceLinkError> {
    let mut hosts = context
        .hosts
        .iter()
        .map(|declaration| {
            Ok(TranslationHost {
                authority: declaration.authority()?,
                declaration: Some(declaration),
            })
        })
        .collect::<Result<Vec<_>, SourceLinkError>>()?;

    if let Some(authority) = context
        .implicit_repository()
        .as_ref()
        .and_then(url_authority)
    {
        hosts.push(TranslationHost {
            authority,
            declaration: None,
        });
    }

    Ok(hosts)
}

/// Translates one remote to the https url the provider serves it at.
/// Remotes that are not absolute urls, whose host is not one of the
/// provider's hosts, or that the provider keeps as they are, come back
/// unchanged.
pub fn translate_url(
    provider: &dyn Provider,
    url: &str,
    context: &ResolveContext<'_>,
) -> Result<String, SourceLinkError> {
    let hosts = translation_hosts(context)?;
    translate_with_hosts(provider, url, &hosts)
}

fn translate_with_hosts(
    provider: &dyn Provider,
    url: &str,
    hosts: &[TranslationHost<'_>],
) -> Result<String, SourceLinkError> {
    let Ok(parsed) = Url::parse(&normalize_remote_url(url)) else {
        return Ok(url.to_string());
    };
    let Some(host) = parsed.host_str().filter(|host| !host.is_empty()) else {
        return Ok(url.to_string());
    };

    // Ports are ignored: ssh and https are served on different ones
    let Some(matched) = hosts
        .iter()
        .find(|candidate| candidate.authority.covers(host))
    else {
        return Ok(url.to_string());
    };

    let translated = match parsed.scheme() {
        "ssh" => provider.translate_ssh_url(&parsed, matched.declaration)?,
        "git" => provider.translate_git_url(&parsed, matched.declaration)?,
        "http" | "https" => provider.translate_http_url(&parsed, matched.declaration)?,
        _ => None,
    };

    Ok(match translated {
        Some(translated) => {
            sourcelink_debug!(format!("translated {} to {}", url, translated));
            translated
        }
        None => url.to_string(),
    })
}

/// Translates the project repository url and the remote of every git root,
/// storing the latter as the roots' `scm_repository_url`. Errors are
/// collected per url.
pub fn translate_repository_urls(
    provider: &dyn Provider,
    repository_url: Option<&str>,
    roots: &mut [RepositoryRoot],
    context: &ResolveContext<'_>,
) -> Result<Option<String>, BatchError> {
    let mut errors = BatchError::new();

    let hosts = match translation_hosts(context) {
        Ok(hosts) => hosts,
        Err(err) => {
            errors.push(provider.kind().to_string(), err);
            return Err(errors);
        }
    };

    let repository_url = match repository_url {
        Some(url) => match translate_with_hosts(provider, url, &hosts) {
            Ok(translated) => Some(translated),
            Err(err) => {
                errors.push(url, err);
                Some(url.to_string())
            }
        },
        None => None,
    };

    for root in roots.iter_mut().filter(|root| root.is_git()) {
        let Some(remote) = root.remote_url().map(str::to_string) else {
            continue;
        };

        match translate_with_hosts(provider, &remote, &hosts) {
            Ok(translated) => root.scm_repository_url = Some(translated),
            Err(err) => errors.push(root.path.clone(), err),
        }
    }

    errors.into_result(repository_url)
}

#[cfg(test)]
#[path = "translate_test.rs"]
mod tests;
