use std::process::exit;

mod internal;

use crate::internal::commands;
use crate::internal::errors::CommandError;

fn main() {
    match commands::run(std::env::args_os()) {
        Ok(()) => exit(0),
        Err(CommandError::Usage(err)) => err.exit(),
        Err(err) => {
            commands::report(&err);
            exit(1);
        }
    }
}
