use ratatui::style::{Color, Modifier, Style};

/// Styles used by the search screen.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub header: Style,
    pub row_highlight: Style,
    pub prompt: Style,
    pub empty: Style,
    pub highlight: Style,
    pub error: Style,
    pub notice: Style,
}

impl Theme {
    #[must_use]
    pub fn header_style(&self) -> Style {
        self.header
    }

    #[must_use]
    pub fn row_highlight_style(&self) -> Style {
        self.row_highlight
    }

    #[must_use]
    pub fn prompt_style(&self) -> Style {
        self.prompt
    }

    #[must_use]
    pub fn empty_style(&self) -> Style {
        self.empty
    }

    #[must_use]
    pub fn highlight_style(&self) -> Style {
        self.highlight
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        self.error
    }

    #[must_use]
    pub fn notice_style(&self) -> Style {
        self.notice
    }

    /// Row highlight for a list that does not currently hold focus.
    #[must_use]
    pub fn inactive_highlight_style(&self) -> Style {
        Style::new().add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::new().fg(Color::Indexed(111)).add_modifier(Modifier::BOLD),
            row_highlight: Style::new().bg(Color::Indexed(237)).add_modifier(Modifier::BOLD),
            prompt: Style::new().fg(Color::Indexed(111)),
            empty: Style::new().fg(Color::DarkGray),
            highlight: Style::new().fg(Color::Yellow),
            error: Style::new().fg(Color::Red),
            notice: Style::new().fg(Color::Yellow),
        }
    }
}
