use crate::core::PackageNameSet;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Backend-specific query syntax and output grammar.
///
/// Implementations only build arguments and parse text; running the binary
/// is left to [`crate::packages::query`], so every backend shares the same
/// failure handling.
pub trait PackageQuery: Send + Sync + fmt::Debug {
    /// Arguments that list installed packages.
    fn installed_args(&self) -> Vec<String>;

    /// Package names from the output of [`Self::installed_args`].
    fn parse_installed(&self, stdout: &str) -> HashSet<String>;

    /// Name under which `package` appears in [`Self::parse_installed`] output.
    fn installed_name<'a>(&self, package: &'a str) -> &'a str {
        package
    }

    /// Arguments that describe `names`, including their versions.
    fn versions_args(&self, names: &PackageNameSet) -> Vec<String>;

    /// Name to version pairs from the output of [`Self::versions_args`].
    /// Entries that cannot be read are left out.
    fn parse_versions(&self, stdout: &str) -> HashMap<String, String>;

    /// Arguments that install every name in one invocation.
    fn install_args(&self, names: &PackageNameSet) -> Vec<String> {
        std::iter::once("install".to_string())
            .chain(names.iter().cloned())
            .collect()
    }
}
