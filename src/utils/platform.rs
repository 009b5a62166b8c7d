use crate::error::Result;
#[cfg(not(unix))]
use crate::error::ToolsyncError;
use std::ffi::OsStr;
use std::process::Command;

/// Privilege-elevation wrapper placed in front of commands that need it.
pub const ELEVATION_PROGRAM: &str = "sudo";

/// Build a shell command in a platform-aware way.
///
/// - Unix: `sh -c <command>` or `sudo sh -c <command>`
pub fn build_shell_command(command: &str, elevated: bool) -> Result<Command> {
    #[cfg(unix)]
    {
        let cmd = if elevated {
            let mut c = Command::new(ELEVATION_PROGRAM);
            c.arg("sh").arg("-c").arg(command);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(command);
            c
        };

        return Ok(cmd);
    }

    #[cfg(not(unix))]
    {
        let _ = (command, elevated);
        Err(ToolsyncError::Other(
            "Package manager bootstrap is only supported on Unix hosts".to_string(),
        ))
    }
}

/// Build a direct program invocation in a platform-aware way.
///
/// - Unix: `program args...` or `sudo program args...`
pub fn build_program_command<P: AsRef<OsStr>>(
    program: P,
    args: &[String],
    elevated: bool,
) -> Result<Command> {
    #[cfg(unix)]
    {
        let cmd = if elevated {
            let mut c = Command::new(ELEVATION_PROGRAM);
            c.arg(program.as_ref());
            c.args(args);
            c
        } else {
            let mut c = Command::new(program.as_ref());
            c.args(args);
            c
        };

        return Ok(cmd);
    }

    #[cfg(not(unix))]
    {
        if elevated {
            return Err(ToolsyncError::Other(
                "Elevated execution is not implemented on this platform".to_string(),
            ));
        }

        let mut cmd = Command::new(program.as_ref());
        cmd.args(args);
        Ok(cmd)
    }
}
