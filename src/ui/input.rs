use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

use super::theme::Theme;

const PLACEHOLDER: &str = "GitHub username, e.g. gaearon";

/// Single-line query editor.
pub struct QueryInput<'a> {
    textarea: TextArea<'a>,
}

impl<'a> QueryInput<'a> {
    pub fn new(text: &str, theme: &Theme) -> Self {
        let mut textarea = TextArea::new(vec![text.to_string()]);
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_placeholder_style(theme.empty_style());
        textarea.move_cursor(CursorMove::End);
        Self { textarea }
    }

    pub fn text(&self) -> &str {
        self.textarea.lines().first().map_or("", String::as_str)
    }

    /// Replace the contents, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str, theme: &Theme) {
        *self = Self::new(text, theme);
    }

    /// Feed a key to the editor. Returns `true` when the text changed.
    pub fn input(&mut self, key: KeyEvent, theme: &Theme) -> bool {
        if !self.textarea.input(key) {
            return false;
        }
        if self.textarea.lines().len() > 1 {
            let joined = self.textarea.lines().concat();
            self.set_text(&joined, theme);
        }
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}
