//! MacPorts query grammar.
//!
//! `port -q installed` prints `  name @version+variants (active)` lines and
//! `port -q info --line --name --version` prints `name<TAB>version` lines.

use crate::core::PackageNameSet;
use crate::packages::traits::PackageQuery;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static INSTALLED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^\s@]+)\s+@").expect("Invalid regex pattern"));

static INFO_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^\s@]+)\s+@?(\S+)\s*$").expect("Invalid regex pattern"));

#[derive(Debug, Clone, Copy, Default)]
pub struct PortQuery;

impl PackageQuery for PortQuery {
    fn installed_args(&self) -> Vec<String> {
        vec!["-q".to_string(), "installed".to_string()]
    }

    fn parse_installed(&self, stdout: &str) -> HashSet<String> {
        stdout
            .lines()
            .filter_map(|line| INSTALLED_LINE.captures(line))
            .map(|caps| caps[1].to_string())
            .collect()
    }

    fn versions_args(&self, names: &PackageNameSet) -> Vec<String> {
        ["-q", "info", "--line", "--name", "--version"]
            .into_iter()
            .map(str::to_string)
            .chain(names.iter().cloned())
            .collect()
    }

    fn parse_versions(&self, stdout: &str) -> HashMap<String, String> {
        stdout
            .lines()
            .filter_map(|line| INFO_LINE.captures(line))
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect()
    }
}
