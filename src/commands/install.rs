use crate::commands::session::Session;
use crate::commands::status;
use crate::config::Settings;
use crate::error::{Result, ToolsyncError};
use crate::packages;
use crate::ui;

pub fn run(settings: &Settings, filters: &[String]) -> Result<()> {
    let session = Session::open(settings, filters)?;
    let rec = session.survey();
    status::show(&session, &rec);

    if rec.missing.is_empty() {
        return Ok(());
    }

    let names: Vec<&str> = rec.missing.iter().map(String::as_str).collect();
    if !settings.dry_run
        && !settings.assume_yes
        && !ui::prompt_yes_no(&format!(
            "Install {} with {}?",
            names.join(", "),
            session.backend.display_name()
        ))
    {
        ui::warning("Installation cancelled.");
        return Ok(());
    }

    let ok = packages::run_install(&session.backend, &rec.missing, settings.dry_run)?;
    if !ok {
        return Err(ToolsyncError::InstallFailed {
            backend: session.backend.display_name().to_string(),
        });
    }

    if settings.dry_run {
        ui::info("Dry run: nothing was installed.");
    } else {
        ui::success(&format!("Installed {} package(s)", rec.missing.len()));
    }
    Ok(())
}
