use crate::backends::ResolvedBackend;
use std::fs;
use std::path::Path;

/// Whether installs through `backend` must run elevated.
///
/// Computed on demand from the backend's prefix; nothing is cached.
pub fn needs_elevation(backend: &ResolvedBackend) -> bool {
    if !backend.descriptor().requires_sudo_check {
        return false;
    }
    match backend.install_prefix() {
        Some(prefix) => !dir_is_writable(prefix),
        None => true,
    }
}

/// Probe writability by creating and removing a hidden file.
pub fn dir_is_writable(dir: &Path) -> bool {
    let probe = dir.join(format!(
        ".{}-write-check-{}",
        crate::project_identity::BINARY_NAME,
        std::process::id()
    ));
    let created = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&probe)
        .is_ok();
    let _ = fs::remove_file(probe);
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::Descriptor;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn homebrew_never_needs_elevation() {
        let backend = ResolvedBackend::new(
            &Descriptor::homebrew(),
            PathBuf::from("/nonexistent/toolsync/bin/brew"),
        );
        assert!(!needs_elevation(&backend));
    }

    #[test]
    fn macports_with_unwritable_prefix_needs_elevation() {
        let backend = ResolvedBackend::new(
            &Descriptor::macports(),
            PathBuf::from("/nonexistent/toolsync/bin/port"),
        );
        assert!(needs_elevation(&backend));
    }

    #[test]
    fn macports_with_writable_prefix_runs_as_user() {
        let prefix = tempdir().expect("tempdir");
        let backend =
            ResolvedBackend::new(&Descriptor::macports(), prefix.path().join("bin").join("port"));
        assert!(!needs_elevation(&backend));
        assert_eq!(std::fs::read_dir(prefix.path()).expect("read").count(), 0);
    }
}
