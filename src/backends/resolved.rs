use crate::backends::descriptor::{BackendKind, Descriptor};
use crate::packages::traits::PackageQuery;
use std::path::{Path, PathBuf};

/// A descriptor paired with the executable that will be driven for the rest
/// of the run. Built once, then only read.
#[derive(Debug, Clone)]
pub struct ResolvedBackend {
    descriptor: Descriptor,
    binary_path: PathBuf,
    query: &'static dyn PackageQuery,
}

impl ResolvedBackend {
    pub fn new(descriptor: &Descriptor, binary_path: PathBuf) -> Self {
        Self {
            query: descriptor.kind.query(),
            descriptor: descriptor.clone(),
            binary_path,
        }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn kind(&self) -> BackendKind {
        self.descriptor.kind
    }

    pub fn display_name(&self) -> &'static str {
        self.descriptor.display_name
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    pub fn query(&self) -> &'static dyn PackageQuery {
        self.query
    }

    /// Installation prefix, e.g. `/opt/local` for `/opt/local/bin/port`.
    pub fn install_prefix(&self) -> Option<&Path> {
        self.binary_path.parent().and_then(Path::parent)
    }
}
