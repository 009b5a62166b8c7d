//! Homebrew query grammar.
//!
//! Installed packages come from `brew list -1`; versions from the JSON that
//! `brew info --json=v2` prints for formulae and casks.

use crate::core::PackageNameSet;
use crate::packages::traits::PackageQuery;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrewQuery;

#[derive(Debug, Default, Deserialize)]
struct BrewInfo {
    #[serde(default)]
    formulae: Vec<Formula>,
    #[serde(default)]
    casks: Vec<Cask>,
}

#[derive(Debug, Deserialize)]
struct Formula {
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    versions: FormulaVersions,
    #[serde(default)]
    installed: Vec<InstalledKeg>,
}

#[derive(Debug, Default, Deserialize)]
struct FormulaVersions {
    #[serde(default)]
    stable: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InstalledKeg {
    version: String,
}

#[derive(Debug, Deserialize)]
struct Cask {
    token: String,
    #[serde(default)]
    full_token: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    installed: Option<String>,
}

impl PackageQuery for BrewQuery {
    fn installed_args(&self) -> Vec<String> {
        vec!["list".to_string(), "-1".to_string()]
    }

    fn parse_installed(&self, stdout: &str) -> HashSet<String> {
        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("==>"))
            .map(str::to_string)
            .collect()
    }

    /// `brew list` prints `terraform` for `hashicorp/tap/terraform`.
    fn installed_name<'a>(&self, package: &'a str) -> &'a str {
        package.rsplit('/').next().unwrap_or(package)
    }

    fn versions_args(&self, names: &PackageNameSet) -> Vec<String> {
        ["info", "--json=v2"]
            .into_iter()
            .map(str::to_string)
            .chain(names.iter().cloned())
            .collect()
    }

    fn parse_versions(&self, stdout: &str) -> HashMap<String, String> {
        let Ok(info) = serde_json::from_str::<BrewInfo>(stdout) else {
            return HashMap::new();
        };

        let mut versions = HashMap::new();
        for formula in info.formulae {
            // Installed keg first, then what would be installed.
            let version = formula
                .installed
                .first()
                .map(|keg| keg.version.clone())
                .or(formula.versions.stable);
            if let Some(version) = version {
                if let Some(full) = formula.full_name.filter(|f| *f != formula.name) {
                    versions.insert(full, version.clone());
                }
                versions.insert(formula.name, version);
            }
        }
        for cask in info.casks {
            if let Some(version) = cask.installed.or(cask.version) {
                if let Some(full) = cask.full_token.filter(|f| *f != cask.token) {
                    versions.insert(full, version.clone());
                }
                versions.insert(cask.token, version);
            }
        }
        versions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_output_is_one_name_per_line() {
        let installed = BrewQuery.parse_installed("git\nripgrep\n\n==> Casks\niterm2\n");
        assert_eq!(installed.len(), 3);
        assert!(installed.contains("iterm2"));
    }

    #[test]
    fn versions_prefer_installed_keg_over_stable() {
        let json = r#"{
            "formulae": [
                {"name": "git", "full_name": "git", "versions": {"stable": "2.45.0"},
                 "installed": [{"version": "2.44.0"}]},
                {"name": "jq", "full_name": "jq", "versions": {"stable": "1.7.1"}, "installed": []}
            ],
            "casks": [
                {"token": "iterm2", "full_token": "iterm2", "version": "3.5.0", "installed": null}
            ]
        }"#;
        let versions = BrewQuery.parse_versions(json);
        assert_eq!(versions.get("git").map(String::as_str), Some("2.44.0"));
        assert_eq!(versions.get("jq").map(String::as_str), Some("1.7.1"));
        assert_eq!(versions.get("iterm2").map(String::as_str), Some("3.5.0"));
    }

    #[test]
    fn tap_qualified_names_are_also_keyed() {
        let json = r#"{"formulae": [{"name": "terraform", "full_name": "hashicorp/tap/terraform",
            "versions": {"stable": "1.9.0"}, "installed": []}], "casks": []}"#;
        let versions = BrewQuery.parse_versions(json);
        assert!(versions.contains_key("terraform"));
        assert!(versions.contains_key("hashicorp/tap/terraform"));
    }

    #[test]
    fn tap_qualified_names_are_listed_by_short_name() {
        assert_eq!(BrewQuery.installed_name("hashicorp/tap/terraform"), "terraform");
        assert_eq!(BrewQuery.installed_name("homebrew/cask/iterm2"), "iterm2");
        assert_eq!(BrewQuery.installed_name("git"), "git");
    }

    #[test]
    fn unparseable_output_yields_no_versions() {
        assert!(BrewQuery.parse_versions("Error: No available formula").is_empty());
    }

    #[test]
    fn versions_args_list_every_name() {
        let names: PackageNameSet = ["jq".to_string(), "git".to_string()].into_iter().collect();
        assert_eq!(BrewQuery.versions_args(&names), vec!["info", "--json=v2", "git", "jq"]);
    }
}
