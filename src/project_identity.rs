//! Central project identity contract.
//!
//! Runtime identity values live here so file names, env keys and user agents
//! agree with each other.

pub const BINARY_NAME: &str = "toolsync";
pub const CONFIG_DIR_NAME: &str = "toolsync";
pub const ENV_PREFIX: &str = "TOOLSYNC";
pub const INVENTORY_FILE_NAME: &str = "tools.json";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn user_agent() -> String {
    format!("{}-cli/{}", BINARY_NAME, env!("CARGO_PKG_VERSION"))
}
