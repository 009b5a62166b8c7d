use crate::backends::descriptor::Descriptor;
use crate::backends::resolved::ResolvedBackend;
use crate::ui;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Find the backend binary: `PATH` first, then the descriptor's directories.
pub fn locate(descriptor: &Descriptor) -> Option<PathBuf> {
    locate_in(descriptor, env::var_os("PATH"))
}

/// Same as [`locate`] with an explicit search path.
pub fn locate_in(descriptor: &Descriptor, search_path: Option<OsString>) -> Option<PathBuf> {
    if let Some(paths) = search_path {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        if let Ok(found) = which::which_in(descriptor.binary_name, Some(paths), &cwd)
            && is_executable(&found)
        {
            let found = if found.is_absolute() {
                found
            } else {
                cwd.join(found)
            };
            return Some(found);
        }
    }

    locate_in_candidates(descriptor)
}

/// Probe only the descriptor's known install directories.
pub fn locate_in_candidates(descriptor: &Descriptor) -> Option<PathBuf> {
    descriptor
        .candidate_dirs
        .iter()
        .map(|dir| dir.join(descriptor.binary_name))
        .find(|path| is_executable(path))
}

/// Every backend in `table` whose binary can be found, in table order.
pub fn detect_available(table: &[Descriptor]) -> Vec<ResolvedBackend> {
    detect_available_in(table, env::var_os("PATH"))
}

pub fn detect_available_in(
    table: &[Descriptor],
    search_path: Option<OsString>,
) -> Vec<ResolvedBackend> {
    table
        .iter()
        .filter_map(|descriptor| {
            let found = locate_in(descriptor, search_path.clone());
            match &found {
                Some(path) => ui::verbose(&format!(
                    "Found {} at {}",
                    descriptor.display_name,
                    path.display()
                )),
                None => ui::verbose(&format!("{} not found", descriptor.display_name)),
            }
            found.map(|path| ResolvedBackend::new(descriptor, path))
        })
        .collect()
}

pub fn is_executable(path: &Path) -> bool {
    let Ok(meta) = path.metadata() else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}
