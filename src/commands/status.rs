use crate::commands::reconcile::{Reconciliation, render_report};
use crate::commands::session::Session;
use crate::config::Settings;
use crate::error::Result;
use crate::ui;

pub fn run(settings: &Settings, filters: &[String]) -> Result<()> {
    let session = Session::open(settings, filters)?;
    let rec = session.survey();
    show(&session, &rec);
    Ok(())
}

/// Print the reconciliation table and a one-line summary.
pub(super) fn show(session: &Session, rec: &Reconciliation) {
    ui::header("Tool status");
    print!("{}", render_report(&session.backend, rec));
    println!();

    if rec.unavailable_count() > 0 {
        ui::info(&format!(
            "{} tool(s) have no {} package",
            rec.unavailable_count(),
            session.backend.display_name()
        ));
    }
    if rec.missing.is_empty() {
        ui::success("Everything available is installed.");
    } else {
        ui::info(&format!("{} package(s) missing", rec.missing.len()));
    }
}
