use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use ghfind_directory::Directory;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use super::App;
use crate::runtime::Executor;
use crate::search::SearchOutcome;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Run `app` in the terminal until the user quits, performing its fetches on
/// `executor`.
pub fn run<D: Directory>(mut app: App<'_>, executor: &Executor<D>) -> Result<SearchOutcome> {
    let mut terminal = ratatui::init();
    let guard = TerminalGuard::new(ratatui::restore);
    terminal.clear()?;

    let (event_tx, event_rx) = mpsc::channel();
    let event_loop_running = Arc::new(AtomicBool::new(true));
    let event_loop_flag = Arc::clone(&event_loop_running);

    let event_thread = thread::spawn(move || -> Result<()> {
        while event_loop_flag.load(Ordering::Relaxed) {
            if event::poll(Duration::from_millis(50))? {
                let event = event::read()?;
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        }
        Ok(())
    });

    let mut pending_events = VecDeque::new();

    let result: Result<SearchOutcome> = 'event_loop: loop {
        let now = Instant::now();
        app.pump(executor, now);
        app.throbber_state.calc_next();

        loop {
            match event_rx.try_recv() {
                Ok(Event::Resize(_, _)) => {}
                Ok(event) => pending_events.push_back(event),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    break 'event_loop Err(anyhow!("input event channel disconnected"));
                }
            }
        }

        if let Err(err) = terminal.draw(|frame| app.draw(frame)) {
            break 'event_loop Err(err.into());
        }
        app.sync_sentinel(Instant::now());

        let mut maybe_outcome = None;
        while let Some(event) = pending_events.pop_front() {
            if let Event::Key(key) = event
                && key.kind == KeyEventKind::Press
                && let Some(outcome) = app.handle_key(key, Instant::now())
            {
                maybe_outcome = Some(outcome);
                break;
            }
        }

        if let Some(outcome) = maybe_outcome {
            break Ok(outcome);
        }

        thread::sleep(FRAME_INTERVAL);
    };

    guard.release();

    event_loop_running.store(false, Ordering::Relaxed);
    match event_thread.join() {
        Ok(join_result) => join_result?,
        Err(err) => std::panic::resume_unwind(err),
    }

    result
}

/// Puts the terminal back into cooked mode when dropped, so early returns
/// and panics do not leave it in the alternate screen.
pub(super) struct TerminalGuard {
    restore: fn(),
    armed: bool,
}

impl TerminalGuard {
    pub(super) fn new(restore: fn()) -> Self {
        Self {
            restore,
            armed: true,
        }
    }

    /// Restore now instead of at drop.
    pub(super) fn release(mut self) {
        self.restore_once();
    }

    fn restore_once(&mut self) {
        if std::mem::take(&mut self.armed) {
            (self.restore)();
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore_once();
    }
}

impl<'a> App<'a> {
    /// Exchange work with the executor: start requested fetches, apply
    /// finished ones and advance the debounce timer.
    pub fn pump<D: Directory>(&mut self, executor: &Executor<D>, now: Instant) {
        executor.dispatch(self.take_effects());
        for completion in executor.drain() {
            self.complete(completion, now);
        }
        self.tick(now);
        executor.dispatch(self.take_effects());
    }
}

#[cfg(test)]
mod tests;
