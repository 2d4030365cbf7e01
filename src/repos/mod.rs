//! Incremental, popularity-sorted repository listings for one user.

mod commands;
mod pager;
mod sentinel;
mod set;

pub use commands::{PageRequest, PageResult};
pub use pager::{PagerPhase, RepoPager};
pub use sentinel::{Intersection, RegionId, ScrollSentinel, VisibilitySignal};
pub use set::{PagedRepositorySet, RepositoryPage};

#[cfg(test)]
pub(crate) use set::tests as fixtures;

/// Repositories requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Shown when a generic repository failure carries no message.
pub const REPOS_FAILURE_FALLBACK: &str = "Unable to load repositories.";
