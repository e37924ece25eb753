use clap::ArgMatches;

use crate::internal::commands::config_arg;
use crate::internal::commands::output_arg;
use crate::internal::commands::required_value;
use crate::internal::commands::roots_arg;
use crate::internal::commands::write_output;
use crate::internal::config::load_source_roots;
use crate::internal::config::SourceLinkConfig;
use crate::internal::errors::CommandError;
use crate::internal::pipeline;
use crate::internal::user_interface::StringColor;
use crate::sourcelink_debug;
use crate::sourcelink_info;

pub(super) fn command() -> clap::Command {
    clap::Command::new("generate")
        .about("Resolve the source link url of every source root and write the manifest")
        .arg(config_arg())
        .arg(roots_arg())
        .arg(output_arg())
}

pub(super) fn exec(matches: &ArgMatches) -> Result<(), CommandError> {
    let config = SourceLinkConfig::load(required_value(matches, "config")?)?;
    let mut roots = load_source_roots(required_value(matches, "roots")?)?;

    let manifest = pipeline::generate(&config, &mut roots)?;
    for (path, url) in manifest.documents() {
        sourcelink_debug!(format!("{} {}", path, url.light_blue()));
    }
    write_output(matches.get_one::<String>("output"), &manifest.to_json()?)?;

    sourcelink_info!(format!(
        "{} of {} source root(s) mapped",
        manifest.len().to_string().light_yellow(),
        roots.len()
    ));
    Ok(())
}
