//! Configuration loading and resolution utilities.
//!
//! `load` layers defaults, config files, `GHFIND__*` environment variables and
//! CLI flags, then validates the result into a [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;
mod util;

pub use loader::load;
pub use resolved::ResolvedConfig;
