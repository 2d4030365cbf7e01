//! Core crate for the `ghfind` GitHub user search.
//!
//! The engine is a [`Session`] of pure reducers: a debounced query feeds the
//! [`SearchOrchestrator`], an expanded candidate feeds the [`RepoPager`], and
//! both are mirrored into a navigable [`Location`]. Network work is expressed
//! as [`Effect`]s that an [`Executor`] performs against a
//! [`Directory`](ghfind_directory::Directory). The [`ui`] module drives a
//! session from the terminal.

pub mod app_dirs;
mod cache;
pub mod debounce;
pub mod expansion;
pub mod failure;
pub mod location;
pub mod logging;
pub mod repos;
pub mod runtime;
pub mod search;
pub mod session;
pub mod ui;

pub use ghfind_directory as directory;

pub use debounce::Debounced;
pub use expansion::ExpansionCoordinator;
pub use failure::{Failure, Notice};
pub use location::{Detached, HistoryMode, Location, MemoryHistory, UpdateSource, UrlParam};
pub use repos::{PagedRepositorySet, RepoPager};
pub use runtime::{Completion, Executor};
pub use search::{SearchOrchestrator, SearchOutcome, SearchSelection};
pub use session::{Effect, Event, Session, SessionConfig};
pub use ui::{App, run};
