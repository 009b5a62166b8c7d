use crate::backends::ResolvedBackend;
use crate::core::PackageNameSet;
use crate::error::Result;
use crate::packages::privilege;
use crate::ui;
use crate::utils::{platform, process, sanitize};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Command;

/// One install invocation covering every requested package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub elevated: bool,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl InstallCommand {
    /// Shell-quoted command line, as printed in preview mode.
    pub fn command_line(&self) -> String {
        let elevation = self
            .elevated
            .then_some(OsStr::new(platform::ELEVATION_PROGRAM));
        let parts = elevation
            .into_iter()
            .chain(std::iter::once(self.program.as_os_str()))
            .chain(self.args.iter().map(OsStr::new));
        process::quote_parts(parts)
    }

    pub fn to_command(&self) -> Result<Command> {
        platform::build_program_command(&self.program, &self.args, self.elevated)
    }
}

/// Build the install invocation for `names` without running anything.
pub fn plan_install(backend: &ResolvedBackend, names: &PackageNameSet) -> Result<InstallCommand> {
    sanitize::validate_package_names(names)?;
    Ok(InstallCommand {
        elevated: privilege::needs_elevation(backend),
        program: backend.binary_path().to_path_buf(),
        args: backend.query().install_args(names),
    })
}

/// Install `names` through `backend` in one foreground invocation.
///
/// In preview mode the command line is printed and reported as successful.
pub fn run_install(backend: &ResolvedBackend, names: &PackageNameSet, preview: bool) -> Result<bool> {
    if names.is_empty() {
        return Ok(true);
    }

    let plan = plan_install(backend, names)?;
    if preview {
        ui::preview_command(&plan.command_line());
        return Ok(true);
    }

    if plan.elevated {
        ui::info(&format!(
            "{} prefix is not writable; installing with {}",
            backend.display_name(),
            platform::ELEVATION_PROGRAM
        ));
    }
    let status = process::run_interactive(&mut plan.to_command()?)?;
    Ok(status.success())
}
