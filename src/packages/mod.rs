//! # Package queries and installs
//!
//! Everything that talks to an already resolved backend:
//!
//! - [`traits::PackageQuery`]: per-backend argument shapes and output grammars
//!   ([`brew`], [`port`]), picked once when the backend is resolved
//! - [`query`]: installed set and version lookups
//! - [`install`]: one install invocation for a whole package set
//! - [`privilege`]: whether that invocation needs elevation

pub mod brew;
pub mod install;
pub mod port;
pub mod privilege;
pub mod query;
pub mod traits;

pub use install::{InstallCommand, plan_install, run_install};
pub use query::{installed_set, versions};
pub use traits::PackageQuery;
