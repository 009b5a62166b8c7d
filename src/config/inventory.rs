use crate::core::ToolRecord;
use crate::error::{Result, ToolsyncError};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Accepted file shapes: a bare array or `{"tools": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum InventoryFile {
    List(Vec<ToolRecord>),
    Wrapped { tools: Vec<ToolRecord> },
}

/// Tool inventory as loaded from disk.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub path: PathBuf,
    pub tools: Vec<ToolRecord>,
}

impl Inventory {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ToolsyncError::InventoryNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ToolsyncError::IoError {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let tools = parse(&content, &path.display().to_string())?;
        Ok(Self {
            path: path.to_path_buf(),
            tools,
        })
    }

    /// Records named in `filters`, or every record when there are none.
    ///
    /// Names match case-insensitively; any unknown name is an error.
    pub fn select(&self, filters: &[String]) -> Result<Vec<ToolRecord>> {
        if filters.is_empty() {
            return Ok(self.tools.clone());
        }

        let wanted: HashSet<String> = filters.iter().map(|f| f.to_lowercase()).collect();
        let known: HashSet<String> = self.tools.iter().map(|t| t.name.to_lowercase()).collect();

        let mut unknown: Vec<&str> = filters
            .iter()
            .filter(|f| !known.contains(&f.to_lowercase()))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            unknown.dedup();
            return Err(ToolsyncError::ConfigError(format!(
                "Unknown tool(s): {}",
                unknown.join(", ")
            )));
        }

        Ok(self
            .tools
            .iter()
            .filter(|t| wanted.contains(&t.name.to_lowercase()))
            .cloned()
            .collect())
    }
}

pub fn parse(content: &str, source: &str) -> Result<Vec<ToolRecord>> {
    let file: InventoryFile =
        serde_json::from_str(content).map_err(|e| ToolsyncError::ParseError {
            file: source.to_string(),
            message: e.to_string(),
        })?;
    let tools = match file {
        InventoryFile::List(tools) | InventoryFile::Wrapped { tools } => tools,
    };

    let mut seen = HashSet::new();
    for tool in &tools {
        if tool.name.trim().is_empty() {
            return Err(ToolsyncError::ConfigError(format!(
                "{}: tool entry with an empty name",
                source
            )));
        }
        if !seen.insert(tool.name.to_lowercase()) {
            return Err(ToolsyncError::ConfigError(format!(
                "{}: tool '{}' is listed more than once",
                source, tool.name
            )));
        }
    }
    Ok(tools)
}
