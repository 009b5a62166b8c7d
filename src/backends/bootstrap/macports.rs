use crate::error::{Result, ToolsyncError};
use crate::project_identity;
use crate::ui;
use crate::utils::{platform, process};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::process::{Command, ExitStatus};
use tempfile::NamedTempFile;
use std::time::Duration;

const INDEX_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub(super) struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

pub(super) fn planned_commands(index_url: &str) -> Vec<String> {
    vec![
        "sw_vers -productVersion".to_string(),
        format!("curl -fsSL {}", index_url),
        "curl -fsSL -o <MacPorts-*.pkg> <asset matching this macOS release>".to_string(),
        "sudo installer -pkg <MacPorts-*.pkg> -target /".to_string(),
    ]
}

/// Download the package for this macOS release and run the system installer.
///
/// The package lives in a scratch file that is removed when this returns,
/// whether the install worked, failed or was interrupted.
pub(super) fn install_latest_package(index_url: &str) -> Result<ExitStatus> {
    let _deferral = ui::defer_interrupts();

    let product_version = host_product_version()?;
    let key = release_key(&product_version).ok_or_else(|| {
        ToolsyncError::Other(format!("Unrecognized macOS version '{}'", product_version))
    })?;
    let name = release_name(&key).ok_or_else(|| {
        ToolsyncError::Other(format!(
            "No MacPorts package is known for macOS {}",
            product_version
        ))
    })?;
    ui::info(&format!("Detected macOS {} ({})", product_version, name));

    let body = fetch_text(index_url)?;
    ui::bail_if_interrupted()?;
    let asset = pick_package_asset(&body, &key, name)?;
    ui::info(&format!("Downloading {}...", asset.name));

    let mut package = scratch_package()?;
    download_into(&asset.browser_download_url, package.as_file_mut())?;
    ui::bail_if_interrupted()?;

    install_from(package, |path| {
        let args = vec![
            "-pkg".to_string(),
            path.display().to_string(),
            "-target".to_string(),
            "/".to_string(),
        ];
        let mut cmd = platform::build_program_command("installer", &args, true)?;
        process::run_interactive(&mut cmd)
    })
}

fn scratch_package() -> Result<NamedTempFile> {
    Ok(tempfile::Builder::new()
        .prefix("macports-")
        .suffix(".pkg")
        .tempfile()?)
}

/// Run `install` on the downloaded package; the package is deleted on return.
fn install_from<F>(package: NamedTempFile, install: F) -> Result<ExitStatus>
where
    F: FnOnce(&Path) -> Result<ExitStatus>,
{
    let status = install(package.path())?;
    ui::bail_if_interrupted()?;
    Ok(status)
}

fn host_product_version() -> Result<String> {
    let mut cmd = Command::new("sw_vers");
    cmd.arg("-productVersion");
    let output = process::run_captured(&mut cmd, INDEX_TIMEOUT)?;
    if !output.status.success() {
        return Err(ToolsyncError::SystemCommandFailed {
            command: "sw_vers -productVersion".into(),
            reason: format!("exited with {}", output.status),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// `14.4.1` -> `14`, `10.15.7` -> `10.15`.
pub(super) fn release_key(product_version: &str) -> Option<String> {
    let mut parts = product_version.trim().split('.');
    let major = parts.next().filter(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))?;
    if major == "10" {
        let minor = parts.next().filter(|p| p.chars().all(|c| c.is_ascii_digit()))?;
        return Some(format!("10.{}", minor));
    }
    Some(major.to_string())
}

pub(super) fn release_name(key: &str) -> Option<&'static str> {
    match key {
        "10.13" => Some("HighSierra"),
        "10.14" => Some("Mojave"),
        "10.15" => Some("Catalina"),
        "11" => Some("BigSur"),
        "12" => Some("Monterey"),
        "13" => Some("Ventura"),
        "14" => Some("Sonoma"),
        "15" => Some("Sequoia"),
        "26" => Some("Tahoe"),
        _ => None,
    }
}

/// Choose the `MacPorts-<ver>-<key>-<Name>.pkg` asset from a release document.
pub(super) fn pick_package_asset(body: &str, key: &str, name: &str) -> Result<ReleaseAsset> {
    let release: Release = serde_json::from_str(body)?;
    let suffix = format!("-{}-{}.pkg", key, name);
    release
        .assets
        .into_iter()
        .find(|asset| asset.name.ends_with(&suffix))
        .ok_or_else(|| {
            ToolsyncError::RemoteFetchError(format!(
                "Release {} has no package ending in '{}'",
                release.tag_name, suffix
            ))
        })
}

fn client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ToolsyncError::RemoteFetchError(e.to_string()))
}

fn fetch_text(url: &str) -> Result<String> {
    ui::verbose(&format!("GET {}", url));
    let response = client(INDEX_TIMEOUT)?
        .get(url)
        .header("User-Agent", project_identity::user_agent())
        .send()
        .map_err(|e| ToolsyncError::RemoteFetchError(e.to_string()))?;
    if !response.status().is_success() {
        return Err(ToolsyncError::RemoteFetchError(format!(
            "HTTP {} for {}",
            response.status(),
            url
        )));
    }
    response
        .text()
        .map_err(|e| ToolsyncError::RemoteFetchError(e.to_string()))
}

fn download_into(url: &str, file: &mut File) -> Result<()> {
    ui::verbose(&format!("GET {}", url));
    let mut response = client(DOWNLOAD_TIMEOUT)?
        .get(url)
        .header("User-Agent", project_identity::user_agent())
        .send()
        .map_err(|e| ToolsyncError::RemoteFetchError(e.to_string()))?;
    if !response.status().is_success() {
        return Err(ToolsyncError::RemoteFetchError(format!(
            "HTTP {} for {}",
            response.status(),
            url
        )));
    }
    response
        .copy_to(file)
        .map_err(|e| ToolsyncError::RemoteFetchError(e.to_string()))?;
    file.sync_all()?;
    Ok(())
}
