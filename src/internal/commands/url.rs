use clap::builder::PossibleValuesParser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;

use crate::internal::commands::required_value;
use crate::internal::config::ProviderConfig;
use crate::internal::errors::CommandError;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::ProviderKind;
use crate::internal::resolve::resolve_source_link_url;
use crate::internal::resolve::ResolveContext;
use crate::internal::source_root::RepositoryRoot;
use crate::internal::translate::translate_url;
use crate::internal::user_interface::StringColor;
use crate::sourcelink_info;

pub(super) fn command() -> clap::Command {
    let mut provider_ids = ProviderKind::ALL
        .iter()
        .map(ProviderKind::id)
        .collect::<Vec<_>>();
    provider_ids.push("tfs");

    clap::Command::new("url")
        .about("Print the source link url of a single repository")
        .arg(
            Arg::new("provider")
                .long("provider")
                .short('p')
                .value_name("KIND")
                .help("Hosting provider of the repository")
                .required(true)
                .value_parser(PossibleValuesParser::new(provider_ids))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST[=CONTENT_URL]")
                .help("Declare a host, optionally with the url its content is served from")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("virtual-directory")
                .long("virtual-directory")
                .value_name("PATH")
                .help("Virtual directory of the declared Azure DevOps Server hosts")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("server-version")
                .long("server-version")
                .value_name("VERSION")
                .help("Version of the declared GitLab or Bitbucket Server hosts")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("enterprise")
                .long("enterprise")
                .help("The declared Bitbucket hosts run Bitbucket Server")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-default-hosts")
                .long("no-default-hosts")
                .help("Do not add the provider's well-known hosts")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("single-provider")
                .long("single-provider")
                .help("Also accept the host of the repository url itself")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("revision")
                .long("revision")
                .value_name("REV")
                .help("Commit the content url points at")
                .required(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("repository_url")
                .value_name("REPOSITORY_URL")
                .help("Remote url of the repository, ssh and scp forms included")
                .required(true)
                .action(ArgAction::Set),
        )
}

/// `HOST[=CONTENT_URL]`, with the provider attributes given on the command
/// line.
fn host_mapping(value: &str, matches: &ArgMatches) -> HostMapping {
    let mut mapping = match value.split_once('=') {
        Some((host, content_url)) => HostMapping::new(host).with_content_url(content_url),
        None => HostMapping::new(value),
    };

    if let Some(virtual_directory) = matches.get_one::<String>("virtual-directory") {
        mapping = mapping.with_virtual_directory(virtual_directory);
    }
    if let Some(version) = matches.get_one::<String>("server-version") {
        mapping = mapping.with_version(version);
    }
    if matches.get_flag("enterprise") {
        mapping = mapping.with_enterprise_edition(true);
    }

    mapping
}

pub(super) fn exec(matches: &ArgMatches) -> Result<(), CommandError> {
    let kind: ProviderKind = required_value(matches, "provider")?
        .parse()
        .map_err(CommandError::InvalidArgument)?;
    let repository_url = required_value(matches, "repository_url")?;
    let revision = required_value(matches, "revision")?;

    let mut provider_config = ProviderConfig::new(kind);
    provider_config.default_hosts = !matches.get_flag("no-default-hosts");
    for value in matches.get_many::<String>("host").into_iter().flatten() {
        provider_config = provider_config.with_host(host_mapping(value, matches));
    }
    let hosts = provider_config.hosts_with_defaults();
    let is_single_provider = matches.get_flag("single-provider");

    let context =
        ResolveContext::new(&hosts).with_repository_url(Some(repository_url), is_single_provider);
    let translated = translate_url(kind.provider(), repository_url, &context)?;
    if translated != repository_url {
        sourcelink_info!(format!(
            "{} translated to {}",
            repository_url,
            translated.light_blue()
        ));
    }

    let mut root = RepositoryRoot::git(".", repository_url, revision);
    root.scm_repository_url = Some(translated.clone());

    let context =
        ResolveContext::new(&hosts).with_repository_url(Some(&translated), is_single_provider);
    let source_link_url = resolve_source_link_url(kind.provider(), &root, &context)?;

    println!("{}", source_link_url);
    Ok(())
}
