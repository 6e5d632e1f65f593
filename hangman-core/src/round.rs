use hangman_types::{GameError, RoundStatus};
use rand::Rng;
use std::fmt;

use crate::{MAX_WRONG_GUESSES, ROUND_SECONDS, ScoringEngine, WordCatalog};

/// A single guessable letter, always uppercase A-Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(char);

impl Letter {
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_alphabetic().then(|| Self(c.to_ascii_uppercase()))
    }

    /// Parse player input such as "a" or " Q "
    pub fn parse(input: &str) -> Result<Self, GameError> {
        let invalid = || GameError::InvalidLetter {
            input: input.to_string(),
        };

        let mut chars = input.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// A to Z, in keyboard order
    pub fn alphabet() -> impl Iterator<Item = Letter> {
        ('A'..='Z').map(Letter)
    }
}

impl TryFrom<char> for Letter {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::new(c).ok_or_else(|| GameError::InvalidLetter {
            input: c.to_string(),
        })
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a call to [`Round::guess_letter`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Round not in progress, or the letter was already guessed
    Ignored,
    Correct,
    Incorrect,
    Won { score: u32 },
    Lost,
}

impl GuessOutcome {
    pub fn ends_round(self) -> bool {
        matches!(self, GuessOutcome::Won { .. } | GuessOutcome::Lost)
    }
}

/// What a call to [`Round::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Counting { remaining_seconds: u32 },
    TimedOut,
}

/// Authoritative state of one round. Transitions only move forward and a
/// terminal round is frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    category: String,
    target_word: String, // Hidden from the page until the round ends
    guessed_letters: Vec<Letter>,
    wrong_guess_count: u32,
    remaining_seconds: u32,
    status: RoundStatus,
    score: Option<u32>,
}

impl Round {
    /// A round that has its word but has not begun
    pub fn new(category: impl Into<String>, target_word: &str) -> Self {
        Self {
            category: category.into(),
            target_word: target_word.to_ascii_uppercase(),
            guessed_letters: Vec::new(),
            wrong_guess_count: 0,
            remaining_seconds: ROUND_SECONDS,
            status: RoundStatus::NotStarted,
            score: None,
        }
    }

    /// A round already in progress on a known word
    pub fn with_word(category: impl Into<String>, target_word: &str) -> Self {
        let mut round = Self::new(category, target_word);
        round.begin();
        round
    }

    /// Pick a word from `category` and begin a round on it
    pub fn start<R: Rng + ?Sized>(
        catalog: &WordCatalog,
        category: &str,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let word = catalog.pick_word(category, rng)?;
        Ok(Self::with_word(category, word))
    }

    /// NotStarted -> InProgress. Has no effect on a round that already began.
    pub fn begin(&mut self) {
        if self.status == RoundStatus::NotStarted {
            self.status = RoundStatus::InProgress;
        }
    }

    pub fn guess_letter(&mut self, letter: Letter) -> GuessOutcome {
        if self.status != RoundStatus::InProgress || self.is_guessed(letter) {
            return GuessOutcome::Ignored;
        }

        self.guessed_letters.push(letter);

        let hit = self.word_contains(letter);
        if !hit {
            self.wrong_guess_count += 1;
        }

        // Win is checked before loss
        if self.is_word_revealed() {
            let score = ScoringEngine::round_score(self.wrong_guess_count, self.remaining_seconds);
            self.status = RoundStatus::Won;
            self.score = Some(score);
            return GuessOutcome::Won { score };
        }

        if self.wrong_guess_count >= MAX_WRONG_GUESSES {
            self.status = RoundStatus::Lost;
            return GuessOutcome::Lost;
        }

        if hit {
            GuessOutcome::Correct
        } else {
            GuessOutcome::Incorrect
        }
    }

    /// One second of the countdown
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != RoundStatus::InProgress {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.status = RoundStatus::TimedOut;
            return TickOutcome::TimedOut;
        }

        TickOutcome::Counting {
            remaining_seconds: self.remaining_seconds,
        }
    }

    pub fn is_guessed(&self, letter: Letter) -> bool {
        self.guessed_letters.contains(&letter)
    }

    pub fn word_contains(&self, letter: Letter) -> bool {
        self.target_word.contains(letter.as_char())
    }

    pub fn is_word_revealed(&self) -> bool {
        self.target_word
            .chars()
            .all(|c| self.guessed_letters.iter().any(|l| l.as_char() == c))
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    /// Guessed letters in the order they were played
    pub fn guessed_letters(&self) -> &[Letter] {
        &self.guessed_letters
    }

    pub fn wrong_guess_count(&self) -> u32 {
        self.wrong_guess_count
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Set once the round is won
    pub fn score(&self) -> Option<u32> {
        self.score
    }
}
