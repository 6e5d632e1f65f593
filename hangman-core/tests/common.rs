#![allow(dead_code)]

use hangman_core::{GameSession, GuessOutcome, Letter, Round, WordCatalog, WordCategory};
use hangman_types::RoundStatus;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

/// Deterministic RNG so word picks repeat between runs
pub fn create_test_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a catalog with a known set of words, including an empty category
pub fn create_test_catalog() -> WordCatalog {
    WordCatalog::new(vec![
        WordCategory::from_word_list("Pets", "cat\ndog\nhamster"),
        WordCategory::from_word_list("Colors", "red\ngreen\nblue"),
        WordCategory::new("Nothing", Vec::new()),
    ])
}

pub fn create_test_session() -> GameSession {
    GameSession::new(Arc::new(create_test_catalog()))
}

pub fn letter(c: char) -> Letter {
    Letter::new(c).expect("test letters are A-Z")
}

/// Guess every letter of `letters` in order, returning each outcome
pub fn guess_all(round: &mut Round, letters: &str) -> Vec<GuessOutcome> {
    letters.chars().map(|c| round.guess_letter(letter(c))).collect()
}

/// Letters that do not appear in `word`, in alphabetical order
pub fn misses_for(word: &str) -> Vec<Letter> {
    Letter::alphabet()
        .filter(|l| !word.contains(l.as_char()))
        .collect()
}

/// Tick until the round leaves `InProgress`
pub fn run_clock_out(round: &mut Round) {
    while round.status() == RoundStatus::InProgress {
        round.tick();
    }
}
