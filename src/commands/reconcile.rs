use crate::backends::{Descriptor, ResolvedBackend};
use crate::core::{PackageNameSet, ToolRecord, package_name_set};
use crate::ui::table::{self, Cell, Tone};
use std::collections::{HashMap, HashSet};

/// Where one inventory tool stands on the resolved backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub tool: String,
    /// `None` when the backend has no package for this tool.
    pub package: Option<String>,
    pub installed: bool,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    pub rows: Vec<ToolStatus>,
    /// Every package the selected tools map to.
    pub packages: PackageNameSet,
    /// Packages that still need installing.
    pub missing: PackageNameSet,
}

impl Reconciliation {
    pub fn unavailable_count(&self) -> usize {
        self.rows.iter().filter(|r| r.package.is_none()).count()
    }
}

pub fn reconcile(
    records: &[ToolRecord],
    descriptor: &Descriptor,
    installed: &HashSet<String>,
    versions: &HashMap<String, String>,
) -> Reconciliation {
    let query = descriptor.kind.query();
    let is_installed = |package: &str| {
        installed.contains(package) || installed.contains(query.installed_name(package))
    };

    let packages = package_name_set(records, descriptor);
    let missing = packages
        .iter()
        .filter(|name| !is_installed(name.as_str()))
        .cloned()
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            let package = record.package_for(descriptor.inventory_key);
            ToolStatus {
                tool: record.name.clone(),
                package: package.map(str::to_string),
                installed: package.is_some_and(|p| is_installed(p)),
                version: package.and_then(|p| versions.get(p).cloned()),
            }
        })
        .collect();

    Reconciliation {
        rows,
        packages,
        missing,
    }
}

pub fn render_report(backend: &ResolvedBackend, rec: &Reconciliation) -> String {
    let rows: Vec<Vec<Cell>> = rec
        .rows
        .iter()
        .map(|row| {
            let (package, status) = match (&row.package, row.installed) {
                (None, _) => (Cell::new("-", Tone::Dim), Cell::new("n/a", Tone::Dim)),
                (Some(p), true) => (Cell::plain(p), Cell::new("installed", Tone::Good)),
                (Some(p), false) => (Cell::plain(p), Cell::new("missing", Tone::Bad)),
            };
            let version = match &row.version {
                Some(v) => Cell::plain(v),
                None => Cell::new("-", Tone::Dim),
            };
            vec![Cell::plain(&row.tool), package, status, version]
        })
        .collect();

    let mut out = format!(
        "{} ({})\n\n",
        backend.display_name(),
        backend.binary_path().display()
    );
    out.push_str(&table::render(&["Tool", "Package", "Status", "Version"], &rows));
    out
}
