//! Terminal front-end for the search session.
//!
//! [`App`] wraps a [`Session`] with view state (focus, cursor, scroll offset
//! and the repository list's scroll sentinel). Key handling lives in
//! `actions`, drawing in `render`, and the event loop in `runtime`.

mod actions;
mod input;
mod render;
mod runtime;
mod text;
mod theme;

use std::time::Instant;

use throbber_widgets_tui::ThrobberState;

use crate::location::MemoryHistory;
use crate::repos::{RegionId, ScrollSentinel, VisibilitySignal};
use crate::runtime::Completion;
use crate::search::SearchOutcome;
use crate::session::{Effect, Event, Session};

pub use input::QueryInput;
pub use runtime::run;
pub use theme::Theme;

/// Region observed below the last repository row.
pub(crate) const SENTINEL_REGION: RegionId = RegionId(1);

/// Which list receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Candidates,
    Repositories,
}

/// State of the interactive search screen.
pub struct App<'a> {
    pub(crate) session: Session<MemoryHistory>,
    pub(crate) input: QueryInput<'a>,
    pub(crate) focus: Focus,
    pub(crate) cursor: usize,
    pub(crate) repo_offset: usize,
    pub(crate) repo_viewport: usize,
    pub(crate) sentinel: ScrollSentinel,
    pub(crate) throbber_state: ThrobberState,
    pub(crate) theme: Theme,
    effects: Vec<Effect>,
}

impl<'a> App<'a> {
    /// Wrap a freshly started session and the effects it asked for.
    pub fn new(session: Session<MemoryHistory>, effects: Vec<Effect>) -> Self {
        let theme = Theme::default();
        let input = QueryInput::new(session.query_text(), &theme);
        let mut app = Self {
            session,
            input,
            focus: Focus::Candidates,
            cursor: 0,
            repo_offset: 0,
            repo_viewport: 0,
            sentinel: ScrollSentinel::new(SENTINEL_REGION),
            throbber_state: ThrobberState::default(),
            theme,
            effects,
        };
        app.after_update();
        app
    }

    #[must_use]
    pub fn session(&self) -> &Session<MemoryHistory> {
        &self.session
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Effects produced since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Advance timers (the query debounce).
    pub fn tick(&mut self, now: Instant) {
        self.apply(Event::Tick, now);
    }

    /// Feed a finished fetch back into the session.
    pub fn complete(&mut self, completion: Completion, now: Instant) {
        self.apply(completion.into(), now);
    }

    #[must_use]
    pub fn outcome(&self) -> SearchOutcome {
        self.session.outcome()
    }

    pub(crate) fn apply(&mut self, event: Event, now: Instant) {
        let effects = self.session.handle(event, now);
        self.effects.extend(effects);
        self.after_update();
    }

    /// Report the repository viewport to the sentinel and request the next
    /// page when it comes into view.
    pub(crate) fn sync_sentinel(&mut self, now: Instant) {
        if self.session.pager().wants_next_page() {
            self.sentinel.observe(SENTINEL_REGION);
        } else {
            self.sentinel.unobserve(SENTINEL_REGION);
        }

        let total = self.session.pager().repositories().len();
        let hit = self
            .sentinel
            .update_viewport(self.repo_offset, self.repo_viewport, total);
        if hit.is_some_and(|intersection| intersection.is_intersecting) {
            self.apply(Event::SentinelVisible, now);
        }
    }

    fn after_update(&mut self) {
        let visible = self.session.search().visible_users().len();
        self.cursor = self.cursor.min(visible.saturating_sub(1));

        if self.session.take_scroll_reset() {
            self.repo_offset = 0;
            self.sentinel.unobserve(SENTINEL_REGION);
        }
        if self.session.pager().username().is_none() {
            self.focus = Focus::Candidates;
        }
        if self.input.text() != self.session.query_text() {
            let query = self.session.query_text().to_string();
            self.input.set_text(&query, &self.theme);
        }
    }
}
