use crate::error::{Result, ToolsyncError};
use crate::ui;
use std::ffi::OsStr;
use std::io::Read;
use std::process::{Command, ExitStatus, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Shell-quoted rendering of a command, for previews and verbose logs.
pub fn describe(cmd: &Command) -> String {
    let parts = std::iter::once(cmd.get_program()).chain(cmd.get_args());
    quote_parts(parts)
}

pub fn quote_parts<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a OsStr>,
{
    parts
        .into_iter()
        .map(|part| {
            let text = part.to_string_lossy();
            shlex::try_quote(&text)
                .map(|q| q.into_owned())
                .unwrap_or_else(|_| text.into_owned())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a non-interactive command, capturing its output, with a timeout.
pub fn run_captured(cmd: &mut Command, timeout: Duration) -> Result<Output> {
    let cmd_debug = describe(cmd);
    ui::verbose(&format!("Running: {}", cmd_debug));

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| ToolsyncError::SystemCommandFailed {
        command: cmd_debug.clone(),
        reason: e.to_string(),
    })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| ToolsyncError::SystemCommandFailed {
            command: cmd_debug.clone(),
            reason: "Failed to capture stdout".to_string(),
        })?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| ToolsyncError::SystemCommandFailed {
            command: cmd_debug.clone(),
            reason: "Failed to capture stderr".to_string(),
        })?;

    // Drain both pipes so a chatty child cannot block on a full buffer.
    let stdout_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stdout).read_to_end(&mut buf);
        buf
    });
    let stderr_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stderr).read_to_end(&mut buf);
        buf
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_thread.join();
                    let _ = stderr_thread.join();
                    return Err(ToolsyncError::SystemCommandFailed {
                        command: cmd_debug,
                        reason: format!("Command timed out after {} seconds", timeout.as_secs()),
                    });
                }
                thread::sleep(Duration::from_millis(20));
            }
            Err(e) => {
                return Err(ToolsyncError::SystemCommandFailed {
                    command: cmd_debug,
                    reason: e.to_string(),
                });
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

/// Run a command in the foreground, sharing this process's terminal.
pub fn run_interactive(cmd: &mut Command) -> Result<ExitStatus> {
    let cmd_debug = describe(cmd);
    ui::verbose(&format!("Running: {}", cmd_debug));

    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ToolsyncError::SystemCommandFailed {
            command: cmd_debug,
            reason: e.to_string(),
        })
}
