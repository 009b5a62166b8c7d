//! Bootstrapping a backend that is not installed yet.
//!
//! Each procedure hands control to the backend's own official installer and
//! waits for it. Those installers may ask for a password themselves. Once they
//! return, the binary is looked up again in the backend's known directories;
//! if it is still missing the run stops. Nothing here is retried.

use crate::backends::descriptor::{Bootstrap, Descriptor};
use crate::backends::locator;
use crate::backends::resolved::ResolvedBackend;
use crate::error::{Result, ToolsyncError};
use crate::ui;
use crate::utils::{platform, process};
use std::process::ExitStatus;

mod macports;

/// Install the backend described by `descriptor` and resolve its binary.
///
/// With `preview` nothing runs: the commands are printed and the binary is
/// assumed to land in the first candidate directory.
pub fn install_backend(descriptor: &Descriptor, preview: bool) -> Result<ResolvedBackend> {
    ui::header(&format!("Installing {}", descriptor.display_name));

    if preview {
        for line in planned_commands(descriptor) {
            ui::preview_command(&line);
        }
        let assumed = descriptor
            .assumed_binary_path()
            .ok_or_else(|| failed(descriptor, "no install location is known"))?;
        ui::info(&format!(
            "Assuming {} at {} for the rest of this dry run",
            descriptor.display_name,
            assumed.display()
        ));
        return Ok(ResolvedBackend::new(descriptor, assumed));
    }

    let status = match &descriptor.bootstrap {
        Bootstrap::RemoteScript { url } => run_remote_script(url),
        Bootstrap::ReleasePackage { index_url } => macports::install_latest_package(index_url),
    }
    .map_err(|e| match e {
        ToolsyncError::Interrupted => ToolsyncError::Interrupted,
        other => failed(descriptor, &other.to_string()),
    })?;

    if !status.success() {
        ui::warning(&format!(
            "{} installer exited with {}; checking whether it got far enough",
            descriptor.display_name, status
        ));
    }

    match locator::locate_in_candidates(descriptor) {
        Some(path) => {
            ui::success(&format!(
                "{} installed at {}",
                descriptor.display_name,
                path.display()
            ));
            Ok(ResolvedBackend::new(descriptor, path))
        }
        None => {
            let searched: Vec<String> = descriptor
                .candidate_dirs
                .iter()
                .map(|d| d.display().to_string())
                .collect();
            Err(failed(
                descriptor,
                &format!(
                    "'{}' was not found in {} after installation",
                    descriptor.binary_name,
                    searched.join(", ")
                ),
            ))
        }
    }
}

/// Commands a bootstrap would run, as shown in preview mode.
pub fn planned_commands(descriptor: &Descriptor) -> Vec<String> {
    match &descriptor.bootstrap {
        Bootstrap::RemoteScript { url } => vec![remote_script_command(url)],
        Bootstrap::ReleasePackage { index_url } => macports::planned_commands(index_url),
    }
}

fn remote_script_command(url: &str) -> String {
    format!("/bin/bash -c \"$(curl -fsSL {})\"", url)
}

fn run_remote_script(url: &str) -> Result<ExitStatus> {
    let mut cmd = platform::build_shell_command(&remote_script_command(url), false)?;
    process::run_interactive(&mut cmd)
}

fn failed(descriptor: &Descriptor, reason: &str) -> ToolsyncError {
    ToolsyncError::BackendInstallFailed {
        backend: descriptor.display_name.to_string(),
        reason: reason.to_string(),
    }
}
