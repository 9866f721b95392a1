//! Decides once per run (and per reload) whether today's question is reused
//! from the cache or fetched fresh.

use chrono::{Local, NaiveDate};
use log::info;
use rand::rngs::StdRng;

use crate::cache::{CacheLookup, CacheStore};
use crate::models::{HistoryEntry, Question};
use crate::session::QuizSession;
use crate::source::QuestionSource;

/// Supplies the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local time zone's date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub struct DailyQuizEngine<S, C, K = LocalClock> {
    source: S,
    store: C,
    clock: K,
    rng: StdRng,
    today_question: Option<Question>,
}

impl<S, C, K> DailyQuizEngine<S, C, K>
where
    S: QuestionSource,
    C: CacheStore,
    K: Clock,
{
    pub fn new(source: S, store: C, clock: K, rng: StdRng) -> Self {
        Self {
            source,
            store,
            clock,
            rng,
            today_question: None,
        }
    }

    /// Today's question. The store and source are consulted only on the
    /// first call; later calls return the in-memory copy.
    pub fn resolve_today_question(&mut self) -> &Question {
        let Self {
            source,
            store,
            clock,
            today_question,
            ..
        } = self;

        today_question.get_or_insert_with(|| resolve(source, &*store, clock.today()))
    }

    /// Forgets the in-memory question and resolves again.
    pub fn reload(&mut self) -> &Question {
        self.today_question = None;
        self.resolve_today_question()
    }

    /// A fresh session over today's question with a new answer order.
    pub fn new_session(&mut self) -> QuizSession {
        let question = self.resolve_today_question().clone();
        QuizSession::new(question, &mut self.rng)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Persisted history, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.store.load().history
    }
}

fn resolve(source: &mut impl QuestionSource, store: &impl CacheStore, today: NaiveDate) -> Question {
    let record = store.load();

    match store.get_today_or_miss(&record, today) {
        CacheLookup::Hit(question) => {
            info!("using cached question for {today}");
            question
        }
        CacheLookup::Miss => {
            info!("no cached question for {today}, fetching");
            let question = source.fetch();
            store.commit(today, &question, &record.history);
            question
        }
    }
}
