//! # Backends
//!
//! Everything needed to end up with exactly one usable package manager:
//!
//! - [`descriptor`]: static table of supported backends
//! - [`locator`]: finds a backend binary on `PATH` or in its known directories
//! - [`bootstrap`]: installs a backend that is not present yet
//! - [`resolution`]: decides which backend this run uses, prompting when needed
//!
//! The result is a [`ResolvedBackend`], which every later step takes by
//! reference and never re-resolves.

pub mod bootstrap;
pub mod descriptor;
pub mod locator;
pub mod resolution;
pub mod resolved;

pub use descriptor::{BackendKind, Bootstrap, Descriptor, descriptor_table};
pub use resolution::{ResolveOptions, resolve_backend};
pub use resolved::ResolvedBackend;
