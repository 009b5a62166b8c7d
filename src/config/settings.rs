use crate::backends::BackendKind;
use crate::cli::args::GlobalFlags;
use crate::error::{Result, ToolsyncError};
use crate::project_identity;
use directories::ProjectDirs;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Run-wide settings: CLI flags first, then `TOOLSYNC_*` env, then defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub inventory_path: PathBuf,
    pub backend: Option<BackendKind>,
    pub dry_run: bool,
    pub assume_yes: bool,
}

impl Settings {
    pub fn resolve(global: &GlobalFlags) -> Result<Self> {
        let cwd = env::current_dir()?;
        let inventory_path = resolve_inventory_path(
            global.inventory.clone(),
            env::var_os(project_identity::env_key("INVENTORY")),
            &cwd,
            user_config_dir(),
        )?;
        let backend = resolve_backend_choice(
            global.backend.as_deref(),
            env::var(project_identity::env_key("BACKEND")).ok(),
        )?;

        Ok(Self {
            inventory_path,
            backend,
            dry_run: global.dry_run,
            assume_yes: global.yes,
        })
    }
}

fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", project_identity::CONFIG_DIR_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Pick the inventory file.
///
/// An explicit path (flag or env) is used as given. Otherwise `./tools.json`
/// and then `<config dir>/tools.json` are tried; if neither exists the error
/// names the first.
pub fn resolve_inventory_path(
    flag: Option<PathBuf>,
    env_value: Option<OsString>,
    cwd: &Path,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    let explicit = flag.or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from));
    if let Some(path) = explicit {
        let path = if path.is_absolute() { path } else { cwd.join(path) };
        if !path.is_file() {
            return Err(ToolsyncError::InventoryNotFound { path });
        }
        return Ok(path);
    }

    let local = cwd.join(project_identity::INVENTORY_FILE_NAME);
    let candidates = std::iter::once(local.clone())
        .chain(config_dir.map(|dir| dir.join(project_identity::INVENTORY_FILE_NAME)));
    for candidate in candidates {
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(ToolsyncError::InventoryNotFound { path: local })
}

pub fn resolve_backend_choice(
    flag: Option<&str>,
    env_value: Option<String>,
) -> Result<Option<BackendKind>> {
    match flag.map(str::to_string).or(env_value.filter(|v| !v.trim().is_empty())) {
        Some(raw) => raw.parse().map(Some),
        None => Ok(None),
    }
}
