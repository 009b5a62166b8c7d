use crate::backends::bootstrap;
use crate::backends::descriptor::{BackendKind, Descriptor};
use crate::backends::resolved::ResolvedBackend;
use crate::error::{Result, ToolsyncError};
use crate::ui;
use crate::ui::selector::Selector;

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Backend requested explicitly (`--backend` / env).
    pub forced: Option<BackendKind>,
    pub preview: bool,
}

/// Settle on exactly one backend for this run.
///
/// `available` is the detection result for `table`, in table order. With one
/// candidate it is used as is; with several the operator picks (first entry
/// highlighted); with none the operator picks one to install.
pub fn resolve_backend(
    table: &[Descriptor],
    available: Vec<ResolvedBackend>,
    selector: &mut dyn Selector,
    options: &ResolveOptions,
) -> Result<ResolvedBackend> {
    if let Some(kind) = options.forced {
        return resolve_forced(table, kind, available, options);
    }

    let mut available = available;
    match available.len() {
        0 => {
            ui::warning("No supported package manager found.");
            let labels: Vec<String> = table
                .iter()
                .map(|d| d.install_prompt_label.to_string())
                .collect();
            let idx = selector.select("Which package manager should be installed?", &labels)?;
            bootstrap::install_backend(&table[idx], options.preview)
        }
        1 => {
            let backend = available.remove(0);
            ui::verbose(&format!(
                "Using {} at {}",
                backend.display_name(),
                backend.binary_path().display()
            ));
            Ok(backend)
        }
        _ => {
            let labels: Vec<String> = available
                .iter()
                .map(|b| b.display_name().to_string())
                .collect();
            let idx = selector.select("Several package managers found. Which one should be used?", &labels)?;
            Ok(available.swap_remove(idx))
        }
    }
}

fn resolve_forced(
    table: &[Descriptor],
    kind: BackendKind,
    available: Vec<ResolvedBackend>,
    options: &ResolveOptions,
) -> Result<ResolvedBackend> {
    if let Some(found) = available.into_iter().find(|b| b.kind() == kind) {
        return Ok(found);
    }

    let descriptor = table.iter().find(|d| d.kind == kind).ok_or_else(|| {
        ToolsyncError::ConfigError(format!("Backend '{}' is not supported here", kind))
    })?;

    ui::warning(&format!(
        "{} was requested but is not installed; installing it now.",
        descriptor.display_name
    ));
    bootstrap::install_backend(descriptor, options.preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Selector that answers from a script and records every prompt.
    struct ScriptedSelector {
        answers: Vec<usize>,
        seen: Vec<Vec<String>>,
    }

    impl ScriptedSelector {
        fn answering(answers: &[usize]) -> Self {
            Self {
                answers: answers.to_vec(),
                seen: Vec::new(),
            }
        }
    }

    impl Selector for ScriptedSelector {
        fn select(&mut self, _prompt: &str, labels: &[String]) -> Result<usize> {
            self.seen.push(labels.to_vec());
            Ok(self.answers.remove(0))
        }
    }

    fn found(descriptor: &Descriptor, path: &str) -> ResolvedBackend {
        ResolvedBackend::new(descriptor, PathBuf::from(path))
    }

    fn table() -> Vec<Descriptor> {
        vec![Descriptor::homebrew(), Descriptor::macports()]
    }

    #[test]
    fn single_backend_is_used_without_prompting() {
        let table = table();
        let mut selector = ScriptedSelector::answering(&[]);
        let available = vec![found(&table[1], "/opt/local/bin/port")];

        let backend =
            resolve_backend(&table, available, &mut selector, &ResolveOptions::default())
                .expect("resolves");
        assert_eq!(backend.kind(), BackendKind::Port);
        assert!(selector.seen.is_empty());
    }

    #[test]
    fn two_backends_prompt_in_table_order() {
        let table = table();
        let mut selector = ScriptedSelector::answering(&[1]);
        let available = vec![
            found(&table[0], "/opt/homebrew/bin/brew"),
            found(&table[1], "/opt/local/bin/port"),
        ];

        let backend =
            resolve_backend(&table, available, &mut selector, &ResolveOptions::default())
                .expect("resolves");
        assert_eq!(backend.kind(), BackendKind::Port);
        assert_eq!(selector.seen, vec![vec!["Homebrew".to_string(), "MacPorts".to_string()]]);
    }

    #[test]
    fn none_found_offers_install_and_previews_choice() {
        let table = table();
        let mut selector = ScriptedSelector::answering(&[1]);
        let options = ResolveOptions {
            preview: true,
            ..ResolveOptions::default()
        };

        let backend =
            resolve_backend(&table, Vec::new(), &mut selector, &options).expect("resolves");
        assert_eq!(backend.kind(), BackendKind::Port);
        assert_eq!(backend.binary_path(), PathBuf::from("/opt/local/bin/port"));
        assert_eq!(
            selector.seen,
            vec![vec![
                "Install Homebrew (recommended)".to_string(),
                "Install MacPorts".to_string()
            ]]
        );
    }

    #[test]
    fn forced_backend_that_is_present_skips_prompt() {
        let table = table();
        let mut selector = ScriptedSelector::answering(&[]);
        let available = vec![
            found(&table[0], "/opt/homebrew/bin/brew"),
            found(&table[1], "/opt/local/bin/port"),
        ];
        let options = ResolveOptions {
            forced: Some(BackendKind::Port),
            ..ResolveOptions::default()
        };

        let backend = resolve_backend(&table, available, &mut selector, &options).expect("resolves");
        assert_eq!(backend.binary_path(), PathBuf::from("/opt/local/bin/port"));
        assert!(selector.seen.is_empty());
    }

    #[test]
    fn forced_backend_that_is_missing_is_bootstrapped() {
        let table = table();
        let mut selector = ScriptedSelector::answering(&[]);
        let available = vec![found(&table[1], "/opt/local/bin/port")];
        let options = ResolveOptions {
            forced: Some(BackendKind::Brew),
            preview: true,
        };

        let backend = resolve_backend(&table, available, &mut selector, &options).expect("resolves");
        assert_eq!(backend.kind(), BackendKind::Brew);
        assert_eq!(backend.binary_path(), PathBuf::from("/opt/homebrew/bin/brew"));
        assert!(selector.seen.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn forced_missing_backend_goes_straight_to_installer() {
        let prefix = tempfile::tempdir().expect("tempdir");
        let table = vec![Descriptor {
            bootstrap: crate::backends::Bootstrap::RemoteScript {
                url: "file:///dev/null",
            },
            ..Descriptor::homebrew().with_candidate_dirs(vec![prefix.path().to_path_buf()])
        }];
        let mut selector = ScriptedSelector::answering(&[]);
        let options = ResolveOptions {
            forced: Some(BackendKind::Brew),
            preview: false,
        };

        // No confirmation is asked: the installer runs and its re-probe decides.
        let err = resolve_backend(&table, Vec::new(), &mut selector, &options)
            .expect_err("installer leaves no binary behind");
        assert!(matches!(err, ToolsyncError::BackendInstallFailed { .. }));
        assert!(selector.seen.is_empty());
    }
}
