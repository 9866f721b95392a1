//! # daily-quiz
//!
//! One quiz question per calendar day, fetched from Open Trivia DB with a
//! built-in fallback pool, cached on disk so every start on the same day
//! shows the same question.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use daily_quiz::{QuizError, Settings};
//!
//! fn main() -> Result<(), QuizError> {
//!     let settings = Settings::default();
//!     daily_quiz::run(&settings)
//! }
//! ```
//!
//! The engine can also be driven without the terminal front end:
//!
//! ```rust,no_run
//! use daily_quiz::{Settings, build_engine};
//!
//! let mut engine = build_engine(&Settings::default());
//! let mut session = engine.new_session();
//! let first = session.presented_order()[0].clone();
//! session.select_answer(&first);
//! println!("correct: {:?}", session.is_correct());
//! ```

mod app;
mod cache;
mod config;
mod engine;
mod models;
mod session;
mod source;
pub mod terminal;
mod ui;

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{info, warn};
use thiserror::Error;

pub use app::{App, View};
pub use cache::{CacheError, CacheLookup, CacheStore, DailyCacheStore};
pub use config::{Settings, data_dir};
pub use engine::{Clock, DailyQuizEngine, LocalClock};
pub use models::{CacheRecord, HISTORY_LIMIT, HistoryEntry, Question, RECORD_VERSION};
pub use session::{AnswerMark, QuizSession, SessionState};
pub use source::{
    Category, OpenTdbClient, ProviderError, QuestionProvider, QuestionSource, TriviaSource,
    fallback_pool, parse_response,
};

/// Error type for the interactive front end.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The engine as wired by [`build_engine`].
pub type DefaultEngine = DailyQuizEngine<TriviaSource<Option<OpenTdbClient>>, DailyCacheStore>;

const SOURCE_RNG_STREAM: u64 = 0;
const SESSION_RNG_STREAM: u64 = 1;

/// Wires the remote provider (unless offline), the file cache and the local clock.
pub fn build_engine(settings: &Settings) -> DefaultEngine {
    let provider = if settings.offline {
        None
    } else {
        match OpenTdbClient::new(settings.api_url.clone(), settings.timeout) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!("remote provider unavailable, running offline: {err}");
                None
            }
        }
    };

    let store = DailyCacheStore::new(settings.cache_path.clone());
    info!("using quiz cache {}", store.path().display());

    DailyQuizEngine::new(
        TriviaSource::new(provider, settings.rng(SOURCE_RNG_STREAM)),
        store,
        LocalClock,
        settings.rng(SESSION_RNG_STREAM),
    )
}

/// Run the daily quiz in the terminal until the user quits.
pub fn run(settings: &Settings) -> Result<(), QuizError> {
    // Resolve before taking over the terminal; this may block on the network.
    let mut app = App::new(build_engine(settings));

    let mut term = terminal::enter()?;
    let result = run_event_loop(&mut term, &mut app);
    terminal::leave(&mut term)?;
    result
}

fn run_event_loop<S, C, K>(
    terminal: &mut terminal::QuizTerminal,
    app: &mut App<S, C, K>,
) -> Result<(), QuizError>
where
    S: QuestionSource,
    C: CacheStore,
    K: Clock,
{
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input<S, C, K>(app: &mut App<S, C, K>, key: KeyCode) -> bool
where
    S: QuestionSource,
    C: CacheStore,
    K: Clock,
{
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reload();
            return false;
        }
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Tab => {
            app.toggle_history();
            return false;
        }
        _ => {}
    }

    match app.view {
        View::Quiz => handle_quiz_input(app, key),
        View::History => handle_history_input(app, key),
    }
    false
}

fn handle_quiz_input<S, C, K>(app: &mut App<S, C, K>, key: KeyCode)
where
    S: QuestionSource,
    C: CacheStore,
    K: Clock,
{
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_answer(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.reveal_answer(),
        _ => {}
    }
}

fn handle_history_input<S, C, K>(app: &mut App<S, C, K>, key: KeyCode)
where
    S: QuestionSource,
    C: CacheStore,
    K: Clock,
{
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_history_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_history_up(),
        _ => {}
    }
}
