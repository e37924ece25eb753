use std::ffi::OsString;
use std::fs;

use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;

use crate::internal::errors::CommandError;
use crate::internal::user_interface::set_verbose;
use crate::internal::user_interface::StringColor;
use crate::sourcelink_error;

mod generate;
mod translate;
mod url;

pub fn cli() -> clap::Command {
    clap::Command::new("sourcelink")
        .about("Maps repository remotes to the content urls debuggers fetch sources from")
        .version(env!("CARGO_PKG_VERSION"))
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Print how each source root was resolved")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(generate::command())
        .subcommand(translate::command())
        .subcommand(url::command())
}

/// Parses `argv` (program name included) and runs the selected command.
pub fn run<I, T>(argv: I) -> Result<(), CommandError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = cli().try_get_matches_from(argv)?;
    set_verbose(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("generate", matches)) => generate::exec(matches),
        Some(("translate", matches)) => translate::exec(matches),
        Some(("url", matches)) => url::exec(matches),
        Some((name, _)) => Err(CommandError::InvalidArgument(format!(
            "unknown command '{}'",
            name
        ))),
        None => Err(CommandError::InvalidArgument("no command given".to_string())),
    }
}

/// Prints a command failure, one line per collected error.
pub fn report(err: &CommandError) {
    match err {
        CommandError::Batch(batch) => {
            for (context, error) in &batch.errors {
                sourcelink_error!(format!("{}: {}", context.light_blue(), error));
            }
            sourcelink_error!(format!("{} error(s), nothing written", batch.len()));
        }
        err => sourcelink_error!(err),
    }
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .value_name("FILE")
        .help("YAML file declaring the providers and their hosts")
        .required(true)
        .action(ArgAction::Set)
}

fn roots_arg() -> Arg {
    Arg::new("roots")
        .long("roots")
        .short('r')
        .value_name("FILE")
        .help("JSON file listing the source roots")
        .required(true)
        .action(ArgAction::Set)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .value_name("FILE")
        .help("Write to FILE instead of stdout")
        .action(ArgAction::Set)
}

fn required_value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, CommandError> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| CommandError::InvalidArgument(format!("missing --{}", name)))
}

fn write_output(output: Option<&String>, contents: &str) -> Result<(), CommandError> {
    match output {
        Some(path) => fs::write(path, contents).map_err(|source| CommandError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            println!("{}", contents);
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
