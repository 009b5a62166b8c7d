use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::config::Settings;
use crate::error::Result;

pub fn dispatch(args: &Cli) -> Result<()> {
    match &args.command {
        Some(Command::Backends) => commands::backends::run(),
        Some(Command::Status { tools }) => {
            commands::status::run(&Settings::resolve(&args.global)?, tools)
        }
        Some(Command::Install { tools }) => {
            commands::install::run(&Settings::resolve(&args.global)?, tools)
        }
        None => commands::install::run(&Settings::resolve(&args.global)?, &[]),
    }
}
