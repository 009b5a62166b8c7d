use crate::error::{Result, ToolsyncError};
use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub mod selector;
pub mod table;

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static DEFERRED_INTERRUPTS: AtomicUsize = AtomicUsize::new(0);

/// Decide once whether output is colored.
pub fn init_colors() {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// `Err(Interrupted)` once Ctrl-C has been seen.
pub fn bail_if_interrupted() -> Result<()> {
    if is_interrupted() {
        return Err(ToolsyncError::Interrupted);
    }
    Ok(())
}

/// While held, Ctrl-C only marks the run as interrupted instead of exiting,
/// so the holder can unwind and clean up first.
#[must_use]
pub struct InterruptDeferral(());

pub fn defer_interrupts() -> InterruptDeferral {
    DEFERRED_INTERRUPTS.fetch_add(1, Ordering::SeqCst);
    InterruptDeferral(())
}

impl Drop for InterruptDeferral {
    fn drop(&mut self) {
        DEFERRED_INTERRUPTS.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn interrupts_deferred() -> bool {
    DEFERRED_INTERRUPTS.load(Ordering::SeqCst) > 0
}

pub fn header(title: &str) {
    if is_quiet() {
        return;
    }
    println!("\n{}", title.bold().underline());
}

pub fn success(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "ℹ".blue().bold(), msg);
}

/// Diagnostics shown only with `--verbose`.
pub fn verbose(msg: &str) {
    if !is_verbose() {
        return;
    }
    eprintln!("{} {}", "·".dimmed(), msg.dimmed());
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print a command that would run in preview mode.
pub fn preview_command(command_line: &str) {
    println!("{} {}", "[dry-run]".yellow().bold(), command_line);
}

pub fn prompt_yes_no(question: &str) -> bool {
    print!("{} {} [Y/n] ", "?".yellow().bold(), question);

    if let Err(e) = io::stdout().flush() {
        eprintln!("\nWarning: Failed to flush terminal: {}", e);
        return false;
    }

    let mut input = String::new();

    match io::stdin().read_line(&mut input) {
        // EOF is not consent
        Ok(0) => {
            println!();
            false
        }
        Ok(_) => answer_is_yes(&input),
        Err(e) => {
            eprintln!("\nWarning: Failed to read input: {}", e);
            false
        }
    }
}

fn answer_is_yes(raw: &str) -> bool {
    let input = raw.trim().to_lowercase();
    input.is_empty() || input == "y" || input == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_defaults_to_yes() {
        assert!(answer_is_yes("\n"));
        assert!(answer_is_yes("Y\n"));
        assert!(answer_is_yes("yes"));
    }

    #[test]
    fn deferral_lasts_as_long_as_the_guard() {
        let outer = defer_interrupts();
        let inner = defer_interrupts();
        drop(inner);
        assert!(interrupts_deferred());
        drop(outer);
        assert!(!interrupts_deferred());
    }

    #[test]
    fn anything_else_is_no() {
        assert!(!answer_is_yes("n\n"));
        assert!(!answer_is_yes("nope"));
    }
}
