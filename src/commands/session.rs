use crate::backends::{self, ResolveOptions, ResolvedBackend, descriptor_table, locator};
use crate::commands::reconcile::{Reconciliation, reconcile};
use crate::config::{Inventory, Settings};
use crate::core::{ToolRecord, package_name_set};
use crate::error::Result;
use crate::packages;
use crate::ui;
use crate::ui::selector::TerminalSelector;

/// Selected tools plus the backend they will be checked against.
pub struct Session {
    pub backend: ResolvedBackend,
    pub tools: Vec<ToolRecord>,
}

impl Session {
    /// Load the inventory, then detect, choose or bootstrap a backend.
    pub fn open(settings: &Settings, filters: &[String]) -> Result<Self> {
        let inventory = Inventory::load(&settings.inventory_path)?;
        ui::verbose(&format!(
            "Loaded {} tool(s) from {}",
            inventory.tools.len(),
            inventory.path.display()
        ));
        let tools = inventory.select(filters)?;

        let table = descriptor_table();
        let available = locator::detect_available(table);
        let options = ResolveOptions {
            forced: settings.backend,
            preview: settings.dry_run,
        };
        let backend =
            backends::resolve_backend(table, available, &mut TerminalSelector, &options)?;

        Ok(Self { backend, tools })
    }

    /// Ask the backend what is installed and at which versions.
    pub fn survey(&self) -> Reconciliation {
        let packages = package_name_set(&self.tools, self.backend.descriptor());
        let installed = packages::installed_set(&self.backend);
        let versions = packages::versions(&self.backend, &packages);
        reconcile(&self.tools, self.backend.descriptor(), &installed, &versions)
    }
}
