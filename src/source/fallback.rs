use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Question;

struct Canned {
    question: &'static str,
    correct: &'static str,
    incorrect: [&'static str; 3],
}

const POOL: [Canned; 10] = [
    Canned {
        question: "What is the capital of Australia?",
        correct: "Canberra",
        incorrect: ["Sydney", "Melbourne", "Brisbane"],
    },
    Canned {
        question: "What is the largest planet in our solar system?",
        correct: "Jupiter",
        incorrect: ["Saturn", "Neptune", "Uranus"],
    },
    Canned {
        question: "In what year did World War II end?",
        correct: "1945",
        incorrect: ["1944", "1946", "1943"],
    },
    Canned {
        question: "What is the smallest prime number?",
        correct: "2",
        incorrect: ["1", "3", "5"],
    },
    Canned {
        question: "Which element has the chemical symbol 'Au'?",
        correct: "Gold",
        incorrect: ["Silver", "Aluminum", "Argon"],
    },
    Canned {
        question: "What is the speed of light in vacuum (approximately)?",
        correct: "299,792 km/s",
        incorrect: ["150,000 km/s", "500,000 km/s", "250,000 km/s"],
    },
    Canned {
        question: "Which country has the longest coastline in the world?",
        correct: "Canada",
        incorrect: ["Russia", "Indonesia", "Norway"],
    },
    Canned {
        question: "What is the most abundant gas in Earth's atmosphere?",
        correct: "Nitrogen",
        incorrect: ["Oxygen", "Carbon Dioxide", "Argon"],
    },
    Canned {
        question: "Which planet is known as the Red Planet?",
        correct: "Mars",
        incorrect: ["Venus", "Mercury", "Jupiter"],
    },
    Canned {
        question: "What is the longest river in Africa?",
        correct: "Nile",
        incorrect: ["Congo", "Niger", "Zambezi"],
    },
];

impl Canned {
    fn to_question(&self) -> Question {
        Question::new(self.question, self.correct, self.incorrect)
    }
}

/// Every built-in question.
pub fn fallback_pool() -> Vec<Question> {
    POOL.iter().map(Canned::to_question).collect()
}

/// A uniformly random built-in question.
pub fn pick_fallback(rng: &mut impl Rng) -> Question {
    POOL.choose(rng).unwrap_or(&POOL[0]).to_question()
}
