use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};
use throbber_widgets_tui::Throbber;
use unicode_width::UnicodeWidthStr;

use super::text::{compact_count, truncate_right};
use super::{App, Focus};
use crate::failure::Notice;
use crate::repos::PagerPhase;
use ghfind_directory::Repository;

const PROMPT: &str = "Search › ";
const NOTICE_HEIGHT: u16 = 4;
const FOOTER_HINT: &str = "Enter expand · Tab focus · Alt+←/→ history · Ctrl+R retry · Esc quit";
const REPOS_PLACEHOLDER: &str = "Press Enter on a user to browse their repositories.";

impl<'a> App<'a> {
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 0,
            horizontal: 1,
        });

        let notice = self.rate_limit_notice();
        let candidates = self.session.search().visible_users().len() as u16;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(if notice.is_some() { NOTICE_HEIGHT } else { 0 }),
                Constraint::Length(candidates),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_input(frame, layout[0]);
        self.render_search_status(frame, layout[1]);
        if let Some((headline, detail)) = notice {
            self.render_notice(frame, layout[2], headline, &detail);
        }
        self.render_candidates(frame, layout[3]);
        self.render_repositories(frame, layout[4]);
        self.render_footer(frame, layout[5]);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let prompt_width = PROMPT.width() as u16;
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(prompt_width), Constraint::Min(1)])
            .split(area);

        frame.render_widget(
            Paragraph::new(PROMPT).style(self.theme.prompt_style()),
            horizontal[0],
        );
        self.input.render(frame, horizontal[1]);

        let busy = self.session.search().is_loading() || self.session.pager().is_fetching();
        if busy {
            self.render_throbber(frame, horizontal[1]);
        }
    }

    /// Right-aligned spinner drawn over the end of the input row.
    fn render_throbber(&self, frame: &mut Frame, area: Rect) {
        if area.width < 2 || area.height == 0 {
            return;
        }
        let muted = self.theme.empty_style();
        let spinner = Throbber::default().style(muted).throbber_style(muted);
        let span = spinner.to_symbol_span(&self.throbber_state);
        let width = (span.width() as u16).min(area.width);
        let spot = Rect {
            x: area.right().saturating_sub(width),
            width,
            ..area
        };
        frame.render_widget(Paragraph::new(Line::from(span)), spot);
    }

    fn render_search_status(&self, frame: &mut Frame, area: Rect) {
        let search = self.session.search();
        let line = match search.notice() {
            Some(Notice::Inline(message)) => Line::styled(message, self.theme.error_style()),
            Some(Notice::RateLimit { .. }) => Line::default(),
            None => match search.status_line() {
                Some(status) if !search.visible_users().is_empty() => {
                    Line::styled(status, self.theme.header_style())
                }
                Some(status) => Line::styled(status, self.theme.empty_style()),
                None => Line::default(),
            },
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect, headline: &str, detail: &str) {
        let block = Block::bordered()
            .title(Span::styled(
                format!(" {headline} "),
                self.theme.notice_style().add_modifier(Modifier::BOLD),
            ))
            .border_style(self.theme.notice_style());
        let body = Paragraph::new(detail.to_string())
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, area);
    }

    fn render_candidates(&self, frame: &mut Frame, area: Rect) {
        let highlight = if self.focus == Focus::Candidates {
            self.theme.row_highlight_style()
        } else {
            self.theme.inactive_highlight_style()
        };
        let width = usize::from(area.width);
        let lines: Vec<Line> = self
            .session
            .search()
            .visible_users()
            .iter()
            .enumerate()
            .map(|(index, user)| {
                let expanded = self.session.expansion().is_expanded(&user.login);
                let marker = if expanded { "▾ " } else { "▸ " };
                let label = format!("{marker}{}", user.login);
                let link = truncate_right(
                    &user.html_url,
                    width.saturating_sub(label.width() + 2),
                );
                let line = Line::from(vec![
                    Span::raw(label),
                    Span::raw("  "),
                    Span::styled(link, self.theme.empty_style()),
                ]);
                if index == self.cursor {
                    line.style(highlight)
                } else {
                    line
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_repositories(&mut self, frame: &mut Frame, area: Rect) {
        let pager = self.session.pager();
        let title = match pager.username() {
            Some(login) => format!(" Repositories · {login} "),
            None => " Repositories ".to_string(),
        };
        let border = if self.focus == Focus::Repositories {
            self.theme.prompt_style()
        } else {
            self.theme.empty_style()
        };
        let block = Block::bordered()
            .title(Span::styled(title, self.theme.header_style()))
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.repo_viewport = usize::from(inner.height);

        let pager = self.session.pager();
        let inline_error = match pager.notice() {
            Some(Notice::Inline(message)) => Some(message),
            _ => None,
        };

        if pager.username().is_none() {
            let text = Paragraph::new(REPOS_PLACEHOLDER).style(self.theme.empty_style());
            frame.render_widget(text, inner);
            return;
        }
        if pager.repositories().is_empty() {
            let line = match (&inline_error, pager.status_line()) {
                (Some(message), _) => Line::styled(message.clone(), self.theme.error_style()),
                (None, Some(status)) => Line::styled(status, self.theme.empty_style()),
                (None, None) => Line::default(),
            };
            frame.render_widget(Paragraph::new(line), inner);
            return;
        }

        let repositories = pager.repositories();
        let width = usize::from(inner.width);
        let start = self.repo_offset.min(repositories.len());
        let end = start.saturating_add(self.repo_viewport);
        let mut lines: Vec<Line> = repositories[start..end.min(repositories.len())]
            .iter()
            .map(|repo| self.repository_line(repo, width))
            .collect();

        if end > repositories.len() {
            let sentinel = match (&inline_error, pager.phase()) {
                (Some(message), _) => Line::styled(message.clone(), self.theme.error_style()),
                (None, PagerPhase::LoadingNextPage) => Line::styled(
                    pager.status_line().unwrap_or_default(),
                    self.theme.empty_style(),
                ),
                _ => Line::default(),
            };
            lines.push(sentinel);
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn repository_line(&self, repo: &Repository, width: usize) -> Line<'static> {
        let stars = format!("★ {:>5}  ", compact_count(repo.stargazers_count));
        let mut spans = vec![
            Span::styled(stars, self.theme.highlight_style()),
            Span::styled(repo.name.clone(), Style::new().add_modifier(Modifier::BOLD)),
        ];
        if repo.fork {
            spans.push(Span::styled(" (fork)", self.theme.empty_style()));
        }
        if let Some(language) = &repo.language {
            spans.push(Span::styled(format!("  {language}"), self.theme.prompt_style()));
        }

        let used: usize = spans.iter().map(Span::width).sum();
        if let Some(description) = repo.description.as_deref().filter(|text| !text.is_empty()) {
            let remaining = width.saturating_sub(used + 2);
            if remaining > 0 {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    truncate_right(description, remaining),
                    self.theme.empty_style(),
                ));
            }
        }
        Line::from(spans)
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let location = self.session.location().href();
        let width = usize::from(area.width);
        let hint = truncate_right(FOOTER_HINT, width.saturating_sub(location.width() + 2));
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(location.width() as u16)])
            .split(area);
        frame.render_widget(
            Paragraph::new(hint).style(self.theme.empty_style()),
            horizontal[0],
        );
        frame.render_widget(
            Paragraph::new(location).style(self.theme.prompt_style()),
            horizontal[1],
        );
    }

    /// Headline and detail of the rate-limit advisory, if either request
    /// stream hit the quota.
    fn rate_limit_notice(&self) -> Option<(&'static str, String)> {
        [self.session.search().notice(), self.session.pager().notice()]
            .into_iter()
            .flatten()
            .find_map(|notice| match notice {
                Notice::RateLimit { headline, detail } => Some((headline, detail)),
                Notice::Inline(_) => None,
            })
    }
}
