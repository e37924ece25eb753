use crate::internal::config::SourceLinkConfig;
use crate::internal::errors::BatchError;
use crate::internal::manifest::generate_manifest;
use crate::internal::manifest::SourceLinkManifest;
use crate::internal::mapping::validate_hosts;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::ProviderKind;
use crate::internal::resolve::resolve_source_roots;
use crate::internal::resolve::ResolveContext;
use crate::internal::source_root::RepositoryRoot;
use crate::internal::translate::translate_repository_urls;
use crate::sourcelink_debug;

struct ConfiguredProvider {
    kind: ProviderKind,
    hosts: Vec<HostMapping>,
}

/// The providers of `config` whose host declarations are valid. Each invalid
/// provider is reported once and left out of the rest of the run.
fn configured_providers(
    config: &SourceLinkConfig,
    errors: &mut BatchError,
) -> Vec<ConfiguredProvider> {
    let mut providers = vec![];
    for provider in &config.providers {
        let hosts = provider.hosts_with_defaults();
        match validate_hosts(provider.kind.provider(), &hosts) {
            Ok(()) => providers.push(ConfiguredProvider {
                kind: provider.kind,
                hosts,
            }),
            Err(err) => errors.push(provider.kind.to_string(), err),
        }
    }
    providers
}

fn provider_context<'a>(
    config: &SourceLinkConfig,
    hosts: &'a [HostMapping],
    repository_url: Option<&'a str>,
) -> ResolveContext<'a> {
    ResolveContext::new(hosts).with_repository_url(repository_url, config.is_single_provider())
}

fn translate_with(
    config: &SourceLinkConfig,
    providers: &[ConfiguredProvider],
    roots: &mut [RepositoryRoot],
    errors: &mut BatchError,
) -> Option<String> {
    let mut repository_url = config.repository_url.clone();

    for provider in providers {
        sourcelink_debug!(format!("translating remotes for {}", provider.kind));

        let project_url = repository_url.clone();
        let context = provider_context(config, &provider.hosts, project_url.as_deref());
        match translate_repository_urls(
            provider.kind.provider(),
            project_url.as_deref(),
            roots,
            &context,
        ) {
            Ok(translated) => repository_url = translated,
            Err(err) => errors.extend(err),
        }
    }

    repository_url
}

/// Translates the project repository url and the remotes of all roots, for
/// every configured provider in order. Returns the translated project url.
pub fn translate(
    config: &SourceLinkConfig,
    roots: &mut [RepositoryRoot],
) -> Result<Option<String>, BatchError> {
    let mut errors = BatchError::new();
    let providers = configured_providers(config, &mut errors);
    let repository_url = translate_with(config, &providers, roots, &mut errors);
    errors.into_result(repository_url)
}

/// Translates, then resolves every root with every configured provider and
/// builds the manifest. All errors of all roots are reported together.
pub fn generate(
    config: &SourceLinkConfig,
    roots: &mut [RepositoryRoot],
) -> Result<SourceLinkManifest, BatchError> {
    let mut errors = BatchError::new();
    let providers = configured_providers(config, &mut errors);
    let repository_url = translate_with(config, &providers, roots, &mut errors);

    for provider in &providers {
        let context = provider_context(config, &provider.hosts, repository_url.as_deref());
        match resolve_source_roots(provider.kind.provider(), roots, &context) {
            Ok(resolved) => sourcelink_debug!(format!(
                "{}: {} source root(s) resolved",
                provider.kind, resolved
            )),
            Err(err) => errors.extend(err),
        }
    }

    errors.into_result(())?;
    generate_manifest(roots)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
