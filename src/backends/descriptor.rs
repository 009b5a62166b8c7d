use crate::error::ToolsyncError;
use crate::packages::brew::BrewQuery;
use crate::packages::port::PortQuery;
use crate::packages::traits::PackageQuery;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

/// Supported package managers.
///
/// To add one, add a variant here, a [`PackageQuery`] implementation, and an
/// entry in the descriptor table below.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum BackendKind {
    Brew,
    Port,
}

impl BackendKind {
    /// Query/parse behavior for this backend.
    pub fn query(self) -> &'static dyn PackageQuery {
        match self {
            Self::Brew => &BrewQuery,
            Self::Port => &PortQuery,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brew => write!(f, "brew"),
            Self::Port => write!(f, "port"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = ToolsyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brew" | "homebrew" => Ok(Self::Brew),
            "port" | "macports" => Ok(Self::Port),
            other => Err(ToolsyncError::ConfigError(format!(
                "Unknown backend '{}' (expected 'brew' or 'port')",
                other
            ))),
        }
    }
}

/// How a missing backend gets bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// Shell installer fetched from a URL and piped into bash.
    RemoteScript { url: &'static str },
    /// Signed `.pkg` picked from a release index for the host OS version.
    ReleasePackage { index_url: &'static str },
}

/// Static shape of one package manager.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub kind: BackendKind,
    pub display_name: &'static str,
    pub binary_name: &'static str,
    /// Probed in order when the binary is not on `PATH`.
    pub candidate_dirs: Vec<PathBuf>,
    /// Tool record field holding this backend's package name.
    pub inventory_key: &'static str,
    /// Whether elevation is decided at runtime from prefix writability.
    pub requires_sudo_check: bool,
    pub install_prompt_label: &'static str,
    pub bootstrap: Bootstrap,
}

impl Descriptor {
    pub fn homebrew() -> Self {
        Self {
            kind: BackendKind::Brew,
            display_name: "Homebrew",
            binary_name: "brew",
            candidate_dirs: vec![
                PathBuf::from("/opt/homebrew/bin"),
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/home/linuxbrew/.linuxbrew/bin"),
            ],
            inventory_key: "brew",
            requires_sudo_check: false,
            install_prompt_label: "Install Homebrew (recommended)",
            bootstrap: Bootstrap::RemoteScript {
                url: "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh",
            },
        }
    }

    pub fn macports() -> Self {
        Self {
            kind: BackendKind::Port,
            display_name: "MacPorts",
            binary_name: "port",
            candidate_dirs: vec![PathBuf::from("/opt/local/bin")],
            inventory_key: "port",
            requires_sudo_check: true,
            install_prompt_label: "Install MacPorts",
            bootstrap: Bootstrap::ReleasePackage {
                index_url: "https://api.github.com/repos/macports/macports-base/releases/latest",
            },
        }
    }

    pub fn with_candidate_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.candidate_dirs = dirs;
        self
    }

    /// Path the binary would have in the first candidate directory.
    pub fn assumed_binary_path(&self) -> Option<PathBuf> {
        self.candidate_dirs
            .first()
            .map(|dir| dir.join(self.binary_name))
    }
}

static DESCRIPTORS: LazyLock<Vec<Descriptor>> =
    LazyLock::new(|| vec![Descriptor::homebrew(), Descriptor::macports()]);

/// All supported backends, in preference order.
pub fn descriptor_table() -> &'static [Descriptor] {
    &DESCRIPTORS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homebrew_is_listed_first() {
        let kinds: Vec<BackendKind> = descriptor_table().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![BackendKind::Brew, BackendKind::Port]);
    }

    #[test]
    fn only_macports_needs_a_sudo_check() {
        assert!(!Descriptor::homebrew().requires_sudo_check);
        assert!(Descriptor::macports().requires_sudo_check);
    }

    #[test]
    fn backend_names_parse_case_insensitively() {
        assert_eq!("Brew".parse::<BackendKind>().unwrap(), BackendKind::Brew);
        assert_eq!("macports".parse::<BackendKind>().unwrap(), BackendKind::Port);
        assert!("apt".parse::<BackendKind>().is_err());
    }

    #[test]
    fn assumed_path_uses_first_candidate() {
        assert_eq!(
            Descriptor::macports().assumed_binary_path(),
            Some(PathBuf::from("/opt/local/bin/port"))
        );
    }
}
