use crate::backends::Descriptor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Distinct package names for one backend; the unit installs and queries work on.
pub type PackageNameSet = BTreeSet<String>;

/// One inventory entry: a tool and its package name per backend.
///
/// Backend keys are open-ended (`"brew": "git"`, `"port": null`); a missing,
/// null or non-string value means the backend has no equivalent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub packages: BTreeMap<String, serde_json::Value>,
}

impl ToolRecord {
    pub fn package_for(&self, inventory_key: &str) -> Option<&str> {
        self.packages
            .get(inventory_key)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Package names `records` need from the backend behind `descriptor`.
pub fn package_name_set(records: &[ToolRecord], descriptor: &Descriptor) -> PackageNameSet {
    records
        .iter()
        .filter_map(|record| record.package_for(descriptor.inventory_key))
        .map(str::to_string)
        .collect()
}
