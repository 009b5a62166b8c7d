use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(
    name = "toolsync",
    about = "Install the tools in your inventory with Homebrew or MacPorts",
    long_about = "Reconciles a JSON tool inventory against Homebrew or MacPorts, shows what is \
                  installed, and installs what is missing. Without a subcommand, runs `install`.",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalFlags {
    /// Tool inventory (JSON). Defaults to ./tools.json, then the config dir
    #[arg(long, value_name = "PATH", global = true)]
    pub inventory: Option<PathBuf>,

    /// Package manager to use: brew or port
    #[arg(long, value_name = "BACKEND", global = true)]
    pub backend: Option<String>,

    /// Show what would run without changing anything
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show which inventory tools are installed
    Status {
        /// Only these tools (by inventory name)
        tools: Vec<String>,
    },

    /// Install missing inventory tools
    Install {
        /// Only these tools (by inventory name)
        tools: Vec<String>,
    },

    /// List supported package managers and where they were found
    Backends,
}
