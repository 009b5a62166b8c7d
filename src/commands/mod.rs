pub mod backends;
pub mod install;
pub mod reconcile;
pub mod session;
pub mod status;
