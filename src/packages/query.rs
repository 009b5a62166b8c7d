//! Read-only questions asked of the resolved backend.
//!
//! Query failures are absence: a backend that cannot answer is treated as
//! having nothing installed and knowing no versions.

use crate::backends::ResolvedBackend;
use crate::core::PackageNameSet;
use crate::ui;
use crate::utils::process;
use std::collections::{HashMap, HashSet};
use std::process::Command;
use std::time::Duration;

const QUERY_TIMEOUT: Duration = Duration::from_secs(120);

/// Names of every package the backend reports as installed.
pub fn installed_set(backend: &ResolvedBackend) -> HashSet<String> {
    let query = backend.query();
    match run_query(backend, &query.installed_args()) {
        Some(stdout) => query.parse_installed(&stdout),
        None => HashSet::new(),
    }
}

/// Version per package name, for the names the backend could describe.
pub fn versions(backend: &ResolvedBackend, names: &PackageNameSet) -> HashMap<String, String> {
    if names.is_empty() {
        return HashMap::new();
    }
    let query = backend.query();
    let Some(stdout) = run_query_lenient(backend, &query.versions_args(names)) else {
        return HashMap::new();
    };
    let mut found = query.parse_versions(&stdout);

    // One unknown name can make the backend print nothing usable for the rest.
    if found.is_empty() && names.len() > 1 {
        ui::verbose(&format!(
            "{} described none of {} packages together; asking one at a time",
            backend.display_name(),
            names.len()
        ));
        for name in names {
            let single: PackageNameSet = std::iter::once(name.clone()).collect();
            if let Some(stdout) = run_query_lenient(backend, &query.versions_args(&single)) {
                found.extend(query.parse_versions(&stdout));
            }
        }
    }

    found
        .into_iter()
        .filter(|(name, _)| names.contains(name))
        .collect()
}

/// Stdout of a successful query, or `None` on any failure.
fn run_query(backend: &ResolvedBackend, args: &[String]) -> Option<String> {
    let mut cmd = Command::new(backend.binary_path());
    cmd.args(args);
    match process::run_captured(&mut cmd, QUERY_TIMEOUT) {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            ui::verbose(&format!(
                "{} query exited with {}; treating as empty",
                backend.display_name(),
                output.status
            ));
            None
        }
        Err(e) => {
            ui::verbose(&format!("{} query failed: {}", backend.display_name(), e));
            None
        }
    }
}

/// Like [`run_query`], but keeps stdout of a non-zero exit: describing several
/// names fails as a whole when one is unknown, yet still prints the others.
fn run_query_lenient(backend: &ResolvedBackend, args: &[String]) -> Option<String> {
    let mut cmd = Command::new(backend.binary_path());
    cmd.args(args);
    match process::run_captured(&mut cmd, QUERY_TIMEOUT) {
        Ok(output) => Some(String::from_utf8_lossy(&output.stdout).into_owned()),
        Err(e) => {
            ui::verbose(&format!("{} query failed: {}", backend.display_name(), e));
            None
        }
    }
}
