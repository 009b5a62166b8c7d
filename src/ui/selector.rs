//! Operator choice between a handful of labeled options.
//!
//! Two renderings share one contract, `select(prompt, labels) -> index`:
//! a live cursor-driven menu when both ends of the terminal are interactive,
//! and a numbered prompt otherwise. Interrupt and end-of-input never return an
//! index; they surface as errors that end the run.

use crate::error::{Result, ToolsyncError};
use crate::ui;
use colored::Colorize;
use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use std::io::{self, BufRead, Write};

#[cfg(test)]
mod tests;

/// One logical key press as far as the menu cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Confirm,
    Interrupt,
    Unrecognized,
}

/// Source of menu key presses.
pub trait KeySource {
    fn read_key(&mut self) -> Result<MenuKey>;
}

/// Anything that can ask the operator to pick one of several options.
pub trait Selector {
    /// Returns an index in `0..labels.len()`. `labels` must not be empty.
    fn select(&mut self, prompt: &str, labels: &[String]) -> Result<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyOutcome {
    Moved(usize),
    Chosen(usize),
    Interrupted,
    Ignored,
}

pub(crate) fn apply_key(selected: usize, key: MenuKey, len: usize) -> KeyOutcome {
    match key {
        MenuKey::Up => KeyOutcome::Moved((selected + len - 1) % len),
        MenuKey::Down => KeyOutcome::Moved((selected + 1) % len),
        MenuKey::Confirm => KeyOutcome::Chosen(selected),
        MenuKey::Interrupt => KeyOutcome::Interrupted,
        MenuKey::Unrecognized => KeyOutcome::Ignored,
    }
}

/// Selector bound to the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn select(&mut self, prompt: &str, labels: &[String]) -> Result<usize> {
        assert!(!labels.is_empty(), "select() called with no options");

        if supports_live_mode() {
            match RawModeGuard::enter() {
                Ok(_raw) => {
                    let stdout = io::stdout();
                    return select_live(
                        prompt,
                        labels,
                        &mut TerminalKeys,
                        stdout.lock(),
                        terminal_width(),
                    );
                }
                Err(e) => ui::verbose(&format!("Raw terminal mode unavailable: {}", e)),
            }
        }

        let stdin = io::stdin();
        let stdout = io::stdout();
        select_numbered(prompt, labels, stdin.lock(), stdout.lock())
    }
}

fn supports_live_mode() -> bool {
    let dumb = std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false);
    !dumb && atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}

fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w as usize)
}

/// Raw mode for the lifetime of the guard.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Key presses read from the terminal in raw mode.
///
/// Escape sequences for arrow keys are decoded by crossterm, which waits only
/// briefly for continuation bytes; a lone Esc arrives as `KeyCode::Esc`.
struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> Result<MenuKey> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                return Ok(map_key_event(key));
            }
        }
    }
}

pub(crate) fn map_key_event(key: KeyEvent) -> MenuKey {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => MenuKey::Interrupt,
        KeyCode::Up | KeyCode::Left => MenuKey::Up,
        KeyCode::Down | KeyCode::Right => MenuKey::Down,
        KeyCode::Enter => MenuKey::Confirm,
        _ => MenuKey::Unrecognized,
    }
}

/// Drawn menu state. The cursor is hidden while it lives and shown again on
/// drop, whichever way the selection loop ends.
struct LiveMenu<W: Write> {
    out: W,
    drawn_lines: u16,
}

impl<W: Write> LiveMenu<W> {
    fn start(mut out: W, prompt: &str) -> io::Result<Self> {
        queue!(out, Hide)?;
        write!(out, "{} {}\r\n", "?".yellow().bold(), prompt.bold())?;
        Ok(Self {
            out,
            drawn_lines: 0,
        })
    }

    fn draw(&mut self, labels: &[String], selected: usize) -> io::Result<()> {
        if self.drawn_lines > 0 {
            queue!(
                self.out,
                MoveUp(self.drawn_lines),
                MoveToColumn(0),
                Clear(ClearType::FromCursorDown)
            )?;
        }
        for (idx, label) in labels.iter().enumerate() {
            if idx == selected {
                write!(self.out, "{} {}\r\n", "❯".cyan().bold(), label.cyan().bold())?;
            } else {
                write!(self.out, "  {}\r\n", label)?;
            }
        }
        self.drawn_lines = u16::try_from(labels.len()).unwrap_or(u16::MAX);
        self.out.flush()
    }
}

impl<W: Write> Drop for LiveMenu<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show);
    }
}

/// Cursor-driven selection over `keys`, drawing into `out`.
pub(crate) fn select_live<K: KeySource, W: Write>(
    prompt: &str,
    labels: &[String],
    keys: &mut K,
    out: W,
    width: Option<usize>,
) -> Result<usize> {
    assert!(!labels.is_empty(), "select() called with no options");

    let labels: Vec<String> = labels.iter().map(|l| fit_to_width(l, width)).collect();
    let mut menu = LiveMenu::start(out, prompt)?;
    let mut selected = 0;
    menu.draw(&labels, selected)?;

    loop {
        match apply_key(selected, keys.read_key()?, labels.len()) {
            KeyOutcome::Moved(next) => {
                selected = next;
                menu.draw(&labels, selected)?;
            }
            KeyOutcome::Chosen(idx) => return Ok(idx),
            KeyOutcome::Interrupted => return Err(ToolsyncError::Interrupted),
            KeyOutcome::Ignored => {}
        }
    }
}

/// Labels must stay on one line each or the redraw lands in the wrong place.
pub(crate) fn fit_to_width(label: &str, width: Option<usize>) -> String {
    // marker + space on the left, one spare column on the right
    let Some(room) = width.map(|w| w.saturating_sub(3)) else {
        return label.to_string();
    };
    if room == 0 || label.chars().count() <= room {
        return label.to_string();
    }
    let mut cut: String = label.chars().take(room.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Numbered prompt reading whole lines from `input`.
pub(crate) fn select_numbered<R: BufRead, W: Write>(
    prompt: &str,
    labels: &[String],
    mut input: R,
    mut out: W,
) -> Result<usize> {
    assert!(!labels.is_empty(), "select() called with no options");

    writeln!(out, "{}", prompt)?;
    for (idx, label) in labels.iter().enumerate() {
        writeln!(out, "  {}) {}", idx + 1, label)?;
    }

    loop {
        write!(out, "Enter choice [1-{}]: ", labels.len())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Err(ToolsyncError::InputClosed);
        }

        match parse_choice(&line, labels.len()) {
            Some(idx) => return Ok(idx),
            None => writeln!(
                out,
                "Please enter a number between 1 and {}.",
                labels.len()
            )?,
        }
    }
}

fn parse_choice(raw: &str, len: usize) -> Option<usize> {
    let n: usize = raw.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}
