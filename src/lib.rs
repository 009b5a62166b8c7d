pub mod backends;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod packages;
pub mod project_identity;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;

/// Run toolsync CLI entrypoint.
pub fn run_cli() {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Signal handling. Raw-mode selection sees Ctrl+C as a key press. Work
    // that owns scratch files defers interrupts and unwinds on its own;
    // anywhere else the run ends here.
    if let Err(e) = ctrlc::set_handler(move || {
        if atty::is(atty::Stream::Stdout) {
            let _ = crossterm::execute!(std::io::stdout(), crossterm::cursor::Show);
        }
        eprintln!();
        ui::mark_interrupted();
        ui::warning("Operation cancelled by user.");
        if !ui::interrupts_deferred() {
            exit(error::ToolsyncError::Interrupted.exit_code());
        }
    }) {
        ui::warning(&format!("Could not install Ctrl-C handler: {}", e));
    }

    // 2. Parse & Run
    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&format!("{}", e));
        exit(e.exit_code());
    }
}
