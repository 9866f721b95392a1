//! Where the daily question comes from.
//!
//! [`TriviaSource`] asks a remote [`QuestionProvider`] first and falls back
//! to the built-in pool on any failure, so [`QuestionSource::fetch`] never
//! fails.

mod fallback;
mod provider;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::models::Question;

pub use fallback::{fallback_pool, pick_fallback};
pub use provider::{
    Category, DEFAULT_API_URL, DEFAULT_TIMEOUT, DIFFICULTY, OpenTdbClient, ProviderError,
    QuestionProvider, parse_response,
};

/// Produces one question per call.
pub trait QuestionSource {
    fn fetch(&mut self) -> Question;
}

/// Remote provider with local fallback.
pub struct TriviaSource<P> {
    provider: P,
    rng: StdRng,
}

impl<P: QuestionProvider> TriviaSource<P> {
    pub fn new(provider: P, rng: StdRng) -> Self {
        Self { provider, rng }
    }

    fn pick_category(&mut self) -> Category {
        *Category::ALL
            .choose(&mut self.rng)
            .unwrap_or(&Category::GeneralKnowledge)
    }
}

impl<P: QuestionProvider> QuestionSource for TriviaSource<P> {
    fn fetch(&mut self) -> Question {
        let category = self.pick_category();

        match self.provider.fetch_one(category) {
            Ok(question) => {
                info!("fetched remote question ({})", category.name());
                question
            }
            Err(ProviderError::Disabled) => {
                info!("remote provider disabled, using local question");
                pick_fallback(&mut self.rng)
            }
            Err(err) => {
                warn!("remote question unavailable, using local question: {err}");
                pick_fallback(&mut self.rng)
            }
        }
    }
}
