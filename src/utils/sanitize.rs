//! Input sanitization for package names handed to external commands.

use crate::error::{Result, ToolsyncError};
use regex::Regex;
use std::sync::LazyLock;

/// Characters package names may use across Homebrew taps and MacPorts ports.
static SAFE_PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9@._+/-]+$").expect("Invalid regex pattern"));

/// Characters that could be dangerous in shell contexts
static SHELL_DANGEROUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[;`$(){}|&<>\\'"\n\r\t ]"#).expect("Invalid regex pattern"));

/// Reject names that could smuggle extra arguments or shell syntax.
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ToolsyncError::UnsafePackageName("(empty)".to_string()));
    }

    if name.len() > 256 {
        let head: String = name.chars().take(50).collect();
        return Err(ToolsyncError::UnsafePackageName(format!(
            "{}... (longer than 256 chars)",
            head
        )));
    }

    if name.starts_with('-') || SHELL_DANGEROUS.is_match(name) || !SAFE_PACKAGE_NAME.is_match(name)
    {
        return Err(ToolsyncError::UnsafePackageName(name.to_string()));
    }

    if name.contains("..") {
        return Err(ToolsyncError::UnsafePackageName(name.to_string()));
    }

    Ok(())
}

pub fn validate_package_names<'a, I>(names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a String>,
{
    for name in names {
        validate_package_name(name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_package_names() {
        assert!(validate_package_name("git").is_ok());
        assert!(validate_package_name("python@3.12").is_ok());
        assert!(validate_package_name("py312-pip").is_ok());
        assert!(validate_package_name("homebrew/cask/iterm2").is_ok());
        assert!(validate_package_name("gcc++").is_ok());
    }

    #[test]
    fn test_shell_injection_blocked() {
        assert!(validate_package_name("foo; rm -rf /").is_err());
        assert!(validate_package_name("foo | cat").is_err());
        assert!(validate_package_name("foo$(cat)").is_err());
        assert!(validate_package_name("foo && echo").is_err());
    }

    #[test]
    fn test_option_like_names_blocked() {
        assert!(validate_package_name("--force").is_err());
        assert!(validate_package_name("-y").is_err());
    }

    #[test]
    fn test_path_traversal_blocked() {
        assert!(validate_package_name("../../../etc/passwd").is_err());
    }

    #[test]
    fn test_empty_and_long_names() {
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name(&"a".repeat(300)).is_err());
    }
}
