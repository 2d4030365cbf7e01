use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use ghfind_directory::{DirectoryError, Repository, UserCandidate};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use crate::location::MemoryHistory;
use crate::repos::PageResult;
use crate::runtime::Completion;
use crate::search::SearchResult;
use crate::session::{Effect, Session, SessionConfig};
use crate::ui::{App, Focus};

use super::TerminalGuard;

fn user(login: &str, id: u64) -> UserCandidate {
    UserCandidate {
        id,
        login: login.to_string(),
        avatar_url: String::new(),
        html_url: format!("https://github.com/{login}"),
    }
}

fn repo(id: u64, name: &str, stars: u64) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        full_name: format!("octocat/{name}"),
        html_url: format!("https://github.com/octocat/{name}"),
        description: Some(format!("{name} description")),
        fork: false,
        stargazers_count: stars,
        language: Some("Rust".into()),
        updated_at: "2024-01-01T00:00:00Z".into(),
    }
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn alt(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::ALT)
}

fn app_for(search: &str, now: Instant) -> App<'static> {
    let (session, effects) = Session::new(MemoryHistory::new(search), SessionConfig::default(), now);
    App::new(session, effects)
}

fn render(app: &mut App<'_>, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| app.draw(frame)).unwrap();
    terminal.backend().to_string()
}

/// Answer the pending search with `users`.
fn load_users(app: &mut App<'_>, users: Vec<UserCandidate>, now: Instant) {
    let id = app
        .take_effects()
        .into_iter()
        .find_map(|effect| match effect {
            Effect::SearchUsers(request) => Some(request.id),
            Effect::FetchPage(_) => None,
        })
        .expect("pending search");
    app.complete(
        Completion::Users(SearchResult {
            id,
            outcome: Ok(users),
        }),
        now,
    );
}

/// Answer the pending page fetch with `repositories`.
fn load_page(app: &mut App<'_>, repositories: Vec<Repository>, now: Instant) {
    let (generation, page) = app
        .take_effects()
        .into_iter()
        .find_map(|effect| match effect {
            Effect::FetchPage(request) => Some((request.generation, request.page)),
            Effect::SearchUsers(_) => None,
        })
        .expect("pending page");
    app.complete(
        Completion::Page(PageResult {
            generation,
            page,
            outcome: Ok(repositories),
        }),
        now,
    );
}

#[test]
fn empty_session_renders_the_placeholder() {
    let now = Instant::now();
    let mut app = app_for("", now);
    let view = render(&mut app, 80, 12);
    assert!(view.contains("Search ›"));
    assert!(view.contains("GitHub username"));
    assert!(view.contains("Press Enter on a user"));
}

#[test]
fn search_results_render_with_heading() {
    let now = Instant::now();
    let mut app = app_for("?q=octo", now);
    let view = render(&mut app, 80, 12);
    assert!(view.contains("Searching users..."));

    load_users(&mut app, vec![user("octocat", 1), user("octodog", 2)], now);
    let view = render(&mut app, 80, 12);
    assert!(view.contains("Search results for “octo”"));
    assert!(view.contains("▸ octocat"));
    assert!(view.contains("▸ octodog"));
}

#[test]
fn typing_updates_the_query_after_the_debounce() {
    let now = Instant::now();
    let mut app = app_for("", now);
    for ch in "octo".chars() {
        app.handle_key(press(KeyCode::Char(ch)), now);
    }
    assert_eq!(app.session().query_text(), "octo");
    assert!(app.take_effects().is_empty());

    app.tick(now + Duration::from_millis(400));
    assert!(matches!(
        app.take_effects().as_slice(),
        [Effect::SearchUsers(request)] if request.query == "octo"
    ));
}

#[test]
fn enter_expands_and_lists_repositories_by_popularity() {
    let now = Instant::now();
    let mut app = app_for("?q=octo", now);
    load_users(&mut app, vec![user("octocat", 1), user("octodog", 2)], now);

    app.handle_key(press(KeyCode::Down), now);
    app.handle_key(press(KeyCode::Enter), now);
    assert_eq!(app.session().expanded(), Some("octodog"));
    assert_eq!(app.session().location().href(), "?q=octo&expanded=octodog");

    load_page(
        &mut app,
        vec![repo(1, "quiet", 1), repo(2, "popular", 90), repo(3, "middling", 5)],
        now,
    );
    let view = render(&mut app, 100, 16);
    assert!(view.contains("▾ octodog"));
    assert!(view.contains("Repositories · octodog"));

    let popular = view.find("popular").unwrap();
    let middling = view.find("middling").unwrap();
    let quiet = view.find("quiet").unwrap();
    assert!(popular < middling && middling < quiet);
}

#[test]
fn sentinel_requests_the_next_page_once() {
    let now = Instant::now();
    let mut app = app_for("?q=octo&expanded=octocat", now);
    load_users(&mut app, vec![user("octocat", 1)], now);
    load_page(
        &mut app,
        (0..10).map(|id| repo(id, &format!("repo{id}"), id)).collect(),
        now,
    );

    render(&mut app, 100, 30);
    app.sync_sentinel(now);
    let effects = app.take_effects();
    assert!(matches!(
        effects.as_slice(),
        [Effect::FetchPage(request)] if request.page == 2
    ));

    render(&mut app, 100, 30);
    app.sync_sentinel(now);
    assert!(app.take_effects().is_empty());
    let view = render(&mut app, 100, 30);
    assert!(view.contains("Loading more repositories..."));
}

#[test]
fn scrolling_reveals_the_sentinel_in_a_short_viewport() {
    let now = Instant::now();
    let mut app = app_for("?q=octo&expanded=octocat", now);
    load_users(&mut app, vec![user("octocat", 1)], now);
    load_page(
        &mut app,
        (0..10).map(|id| repo(id, &format!("repo{id}"), id)).collect(),
        now,
    );

    render(&mut app, 100, 12);
    app.sync_sentinel(now);
    assert!(app.take_effects().is_empty());

    app.handle_key(press(KeyCode::Tab), now);
    assert_eq!(app.focus(), Focus::Repositories);
    app.handle_key(press(KeyCode::PageDown), now);
    app.handle_key(press(KeyCode::PageDown), now);
    render(&mut app, 100, 12);
    app.sync_sentinel(now);
    assert_eq!(app.take_effects().len(), 1);
}

#[test]
fn rate_limits_show_the_dedicated_notice() {
    let now = Instant::now();
    let mut app = app_for("?q=octo", now);
    let id = match app.take_effects().as_slice() {
        [Effect::SearchUsers(request)] => request.id,
        other => panic!("unexpected effects {other:?}"),
    };
    app.complete(
        Completion::Users(SearchResult {
            id,
            outcome: Err(DirectoryError::RateLimited),
        }),
        now,
    );

    let view = render(&mut app, 100, 16);
    assert!(view.contains("GitHub rate limit reached"));
    assert!(view.contains("GitHub API rate limit exceeded."));
}

#[test]
fn history_keys_restore_the_previous_query_text() {
    let now = Instant::now();
    let mut app = app_for("", now);
    for ch in "octo".chars() {
        app.handle_key(press(KeyCode::Char(ch)), now);
    }
    app.tick(now + Duration::from_millis(400));
    app.handle_key(press(KeyCode::Char('s')), now + Duration::from_millis(500));
    assert_eq!(app.session().location().href(), "?q=octos");

    app.handle_key(alt(KeyCode::Left), now + Duration::from_millis(600));
    assert_eq!(app.input.text(), "octo");
    app.handle_key(alt(KeyCode::Right), now + Duration::from_millis(700));
    assert_eq!(app.input.text(), "octos");
}

#[test]
fn escape_returns_the_final_location() {
    let now = Instant::now();
    let mut app = app_for("?q=octo&expanded=octocat", now);
    load_users(&mut app, vec![user("octocat", 1)], now);

    let outcome = app.handle_key(press(KeyCode::Esc), now).expect("outcome");
    assert_eq!(outcome.location, "?q=octo&expanded=octocat");
    assert_eq!(outcome.expanded_login(), Some("octocat"));
}

static RESTORES: AtomicUsize = AtomicUsize::new(0);

fn count_restore() {
    RESTORES.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn terminal_is_restored_exactly_once_on_every_exit_path() {
    fn fails_during_setup() -> anyhow::Result<()> {
        let _guard = TerminalGuard::new(count_restore);
        Err(anyhow::anyhow!("clear failed"))
    }

    let before = RESTORES.load(Ordering::SeqCst);
    assert!(fails_during_setup().is_err());
    assert_eq!(RESTORES.load(Ordering::SeqCst), before + 1);

    TerminalGuard::new(count_restore).release();
    assert_eq!(RESTORES.load(Ordering::SeqCst), before + 2);
}
