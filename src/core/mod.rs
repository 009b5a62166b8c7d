pub mod types;

pub use types::{PackageNameSet, ToolRecord, package_name_set};
