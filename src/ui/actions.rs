use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Focus};
use crate::search::SearchOutcome;
use crate::session::Event;

impl<'a> App<'a> {
    /// Apply a key press. Returns the outcome once the user quits.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<SearchOutcome> {
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => return Some(self.outcome()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(self.outcome());
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.apply(Event::Retry, now);
            }
            KeyCode::Left if alt => self.apply(Event::Traverse(-1), now),
            KeyCode::Right if alt => self.apply(Event::Traverse(1), now),
            KeyCode::Enter => self.toggle_at_cursor(now),
            KeyCode::Tab | KeyCode::BackTab => self.switch_focus(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::PageUp => self.scroll_repos_up(self.page_rows()),
            KeyCode::PageDown => self.scroll_repos_down(self.page_rows()),
            _ => {
                if self.input.input(key, &self.theme) {
                    let text = self.input.text().to_string();
                    self.apply(Event::QueryEdited(text), now);
                }
            }
        }
        None
    }

    fn toggle_at_cursor(&mut self, now: Instant) {
        let Some(login) = self
            .session
            .search()
            .visible_users()
            .get(self.cursor)
            .map(|user| user.login.clone())
        else {
            return;
        };
        self.apply(Event::ToggleExpanded(login), now);
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Candidates if self.session.pager().username().is_some() => Focus::Repositories,
            _ => Focus::Candidates,
        };
    }

    fn move_up(&mut self) {
        match self.focus {
            Focus::Candidates => self.cursor = self.cursor.saturating_sub(1),
            Focus::Repositories => self.scroll_repos_up(1),
        }
    }

    fn move_down(&mut self) {
        match self.focus {
            Focus::Candidates => {
                let visible = self.session.search().visible_users().len();
                if self.cursor + 1 < visible {
                    self.cursor += 1;
                }
            }
            Focus::Repositories => self.scroll_repos_down(1),
        }
    }

    fn page_rows(&self) -> usize {
        self.repo_viewport.max(1)
    }

    fn scroll_repos_up(&mut self, rows: usize) {
        self.repo_offset = self.repo_offset.saturating_sub(rows);
    }

    /// Scroll down, allowing the row just past the list (the sentinel) to
    /// come into view.
    fn scroll_repos_down(&mut self, rows: usize) {
        let total = self.session.pager().repositories().len();
        let max_offset = (total + 1).saturating_sub(self.repo_viewport.max(1));
        self.repo_offset = self.repo_offset.saturating_add(rows).min(max_offset);
    }
}
