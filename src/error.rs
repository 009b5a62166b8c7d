use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolsyncError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error("Parsing error in '{file}': {message}")]
    ParseError { file: String, message: String },

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("Inventory not found at: {path}")]
    InventoryNotFound { path: PathBuf },

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    /// Remote resource fetch error (HTTP, network, etc.)
    #[error("Failed to fetch remote resource: {0}")]
    RemoteFetchError(String),

    /// The bootstrap procedure ran but the backend binary is still missing.
    #[error("Could not install {backend}: {reason}")]
    BackendInstallFailed { backend: String, reason: String },

    #[error("{backend} install failed")]
    InstallFailed { backend: String },

    #[error("Unsafe package name: {0}")]
    UnsafePackageName(String),

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("No more input while waiting for a selection")]
    InputClosed,

    #[error("{0}")]
    Other(String),
}

impl ToolsyncError {
    /// Process exit status for this error at the CLI boundary.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted => 130,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolsyncError>;
