use clap::ArgMatches;
use serde::Serialize;

use crate::internal::commands::config_arg;
use crate::internal::commands::output_arg;
use crate::internal::commands::required_value;
use crate::internal::commands::roots_arg;
use crate::internal::commands::write_output;
use crate::internal::config::load_source_roots;
use crate::internal::config::SourceLinkConfig;
use crate::internal::errors::CommandError;
use crate::internal::pipeline;
use crate::internal::source_root::RepositoryRoot;

#[derive(Debug, Serialize)]
struct TranslateOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    repository_url: Option<String>,
    roots: Vec<RepositoryRoot>,
}

pub(super) fn command() -> clap::Command {
    clap::Command::new("translate")
        .about("Translate the ssh remotes of the project and its source roots to https")
        .arg(config_arg())
        .arg(roots_arg())
        .arg(output_arg())
}

pub(super) fn exec(matches: &ArgMatches) -> Result<(), CommandError> {
    let config = SourceLinkConfig::load(required_value(matches, "config")?)?;
    let mut roots = load_source_roots(required_value(matches, "roots")?)?;

    let repository_url = pipeline::translate(&config, &mut roots)?;
    let output = TranslateOutput {
        repository_url,
        roots,
    };

    write_output(
        matches.get_one::<String>("output"),
        &serde_json::to_string_pretty(&output)?,
    )
}
