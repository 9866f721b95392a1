use chrono::NaiveDate;

use crate::cache::CacheStore;
use crate::engine::{Clock, DailyQuizEngine};
use crate::models::HistoryEntry;
use crate::session::QuizSession;
use crate::source::QuestionSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Quiz,
    History,
}

/// Front-end state: which view is shown, the cursor, and the current session.
pub struct App<S, C, K> {
    pub view: View,
    engine: DailyQuizEngine<S, C, K>,
    session: QuizSession,
    cursor: usize,
    history: Vec<HistoryEntry>,
    history_scroll: usize,
}

impl<S, C, K> App<S, C, K>
where
    S: QuestionSource,
    C: CacheStore,
    K: Clock,
{
    pub fn new(mut engine: DailyQuizEngine<S, C, K>) -> Self {
        let session = engine.new_session();

        Self {
            view: View::Quiz,
            engine,
            session,
            cursor: 0,
            history: Vec::new(),
            history_scroll: 0,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn today(&self) -> NaiveDate {
        self.engine.today()
    }

    /// History snapshot taken when the view was opened, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_scroll(&self) -> usize {
        self.history_scroll
    }

    pub fn select_next_option(&mut self) {
        let count = self.session.presented_order().len();
        if self.session.is_locked() || count == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % count;
    }

    pub fn select_previous_option(&mut self) {
        let count = self.session.presented_order().len();
        if self.session.is_locked() || count == 0 {
            return;
        }
        self.cursor = (self.cursor + count - 1) % count;
    }

    pub fn submit_answer(&mut self) {
        if let Some(choice) = self.session.presented_order().get(self.cursor).cloned() {
            self.session.select_answer(&choice);
        }
    }

    pub fn reveal_answer(&mut self) {
        self.session.reveal();
    }

    /// Re-resolves today's question and starts over with a fresh session.
    pub fn reload(&mut self) {
        self.engine.reload();
        self.show_quiz();
        if self.view == View::History {
            self.refresh_history();
        }
    }

    pub fn toggle_history(&mut self) {
        match self.view {
            View::Quiz => {
                self.refresh_history();
                self.view = View::History;
            }
            View::History => {
                self.show_quiz();
                self.view = View::Quiz;
            }
        }
    }

    pub fn scroll_history_down(&mut self) {
        if self.history_scroll + 1 < self.history.len() {
            self.history_scroll += 1;
        }
    }

    pub fn scroll_history_up(&mut self) {
        self.history_scroll = self.history_scroll.saturating_sub(1);
    }

    fn show_quiz(&mut self) {
        self.session = self.engine.new_session();
        self.cursor = 0;
    }

    fn refresh_history(&mut self) {
        self.history = self.engine.history();
        self.history.reverse();
        self.history_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DailyCacheStore;
    use crate::engine::LocalClock;
    use crate::session::SessionState;
    use crate::source::{OpenTdbClient, TriviaSource};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    type OfflineApp = App<TriviaSource<Option<OpenTdbClient>>, DailyCacheStore, LocalClock>;

    fn offline_app(dir: &tempfile::TempDir) -> OfflineApp {
        let engine = DailyQuizEngine::new(
            TriviaSource::new(None, StdRng::seed_from_u64(1)),
            DailyCacheStore::new(dir.path().join("quiz_cache.json")),
            LocalClock,
            StdRng::seed_from_u64(2),
        );
        App::new(engine)
    }

    #[test]
    fn test_cursor_wraps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        let count = app.session().presented_order().len();

        app.select_previous_option();
        assert_eq!(app.cursor(), count - 1);
        app.select_next_option();
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn test_submit_selects_answer_under_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.select_next_option();
        let expected = app.session().presented_order()[1].clone();

        app.submit_answer();

        assert_eq!(app.session().state(), SessionState::Answered);
        assert_eq!(app.session().selected(), Some(expected.as_str()));

        app.select_next_option();
        assert_eq!(app.cursor(), 1);
    }

    #[test]
    fn test_reload_starts_fresh_session_with_same_question() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        let question = app.session().question().clone();
        app.reveal_answer();

        app.reload();

        assert_eq!(app.session().state(), SessionState::Unanswered);
        assert_eq!(app.session().question(), &question);
    }

    #[test]
    fn test_history_view_lists_today() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);

        app.toggle_history();
        assert_eq!(app.view, View::History);
        assert_eq!(app.history().len(), 1);
        assert_eq!(app.history()[0].date, app.today());

        app.scroll_history_down();
        assert_eq!(app.history_scroll(), 0);

        app.toggle_history();
        assert_eq!(app.view, View::Quiz);
    }
}
