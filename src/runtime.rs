//! Performs session effects against a [`Directory`] off the UI thread.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use anyhow::{Context, Result};
use ghfind_directory::Directory;
use tokio::runtime::{Builder, Runtime};

use crate::repos::PageResult;
use crate::search::SearchResult;
use crate::session::{Effect, Event};

/// A finished effect, ready to be fed back into the session.
#[derive(Debug)]
pub enum Completion {
    Users(SearchResult),
    Page(PageResult),
}

impl From<Completion> for Event {
    fn from(completion: Completion) -> Self {
        match completion {
            Completion::Users(result) => Event::UsersLoaded(result),
            Completion::Page(result) => Event::PageLoaded(result),
        }
    }
}

/// Runs fetches as tokio tasks and hands their results back over a channel.
///
/// Tasks are never cancelled: a superseded request finishes and its result is
/// discarded by the session.
pub struct Executor<D: Directory> {
    runtime: Runtime,
    directory: Arc<D>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl<D: Directory> Executor<D> {
    pub fn new(directory: D) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("ghfind-io")
            .enable_all()
            .build()
            .context("failed to start the network runtime")?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            runtime,
            directory: Arc::new(directory),
            tx,
            rx,
        })
    }

    /// Start every effect in `effects`.
    pub fn dispatch(&self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.spawn(effect);
        }
    }

    fn spawn(&self, effect: Effect) {
        let directory = Arc::clone(&self.directory);
        let tx = self.tx.clone();
        match effect {
            Effect::SearchUsers(request) => {
                tracing::debug!(id = request.id, query = %request.query, "searching users");
                self.runtime.spawn(async move {
                    let outcome = directory.search_users(&request.query).await;
                    let _ = tx.send(Completion::Users(SearchResult {
                        id: request.id,
                        outcome,
                    }));
                });
            }
            Effect::FetchPage(request) => {
                tracing::debug!(
                    generation = request.generation,
                    username = %request.username,
                    page = request.page,
                    "fetching repositories"
                );
                self.runtime.spawn(async move {
                    let outcome = directory
                        .user_repos(&request.username, request.page, request.page_size)
                        .await;
                    let _ = tx.send(Completion::Page(PageResult {
                        generation: request.generation,
                        page: request.page,
                        outcome,
                    }));
                });
            }
        }
    }

    /// Return a completion if one is ready.
    pub fn try_recv(&self) -> Option<Completion> {
        match self.rx.try_recv() {
            Ok(completion) => Some(completion),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next completion.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Completion> {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Collect every completion that is ready without blocking.
    pub fn drain(&self) -> Vec<Completion> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
