//! View-model for the page: word blanks, keyboard, gallows figure and the
//! end-of-round message. Pure functions of a [`Round`].

use hangman_types::{FigurePart, KeyState, KeyView, RoundStatus, RoundView};

use crate::{Letter, MAX_WRONG_GUESSES, Round};

const BLANK: char = '_';

/// The word with unguessed letters blanked, letters separated by spaces
pub fn masked_word(round: &Round) -> String {
    round
        .target_word()
        .chars()
        .map(|c| match Letter::new(c) {
            Some(letter) if round.is_guessed(letter) => c,
            _ => BLANK,
        })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn key_state(round: &Round, letter: Letter) -> KeyState {
    if !round.is_guessed(letter) {
        KeyState::Neutral
    } else if round.word_contains(letter) {
        KeyState::Correct
    } else {
        KeyState::Incorrect
    }
}

/// A-Z keys. Guessed keys are disabled, and so is every key once the round is over.
pub fn keyboard(round: &Round) -> Vec<KeyView> {
    Letter::alphabet()
        .map(|letter| KeyView {
            letter: letter.as_char(),
            state: key_state(round, letter),
            disabled: round.is_finished() || round.is_guessed(letter),
        })
        .collect()
}

/// One figure part per wrong guess
pub fn figure(wrong_guess_count: u32) -> Vec<FigurePart> {
    let shown = (wrong_guess_count as usize).min(FigurePart::ALL.len());
    FigurePart::ALL[..shown].to_vec()
}

/// Message for the end-of-round modal, `None` while the round is still running
pub fn outcome_message(round: &Round) -> Option<String> {
    let word = round.target_word();
    match round.status() {
        RoundStatus::Won => Some(format!(
            "You won! The word was \"{}\". Your score is {}.",
            word,
            round.score().unwrap_or_default()
        )),
        RoundStatus::Lost => Some(format!("Game over! The word was \"{}\".", word)),
        RoundStatus::TimedOut => Some(format!("Time's up! The word was \"{}\".", word)),
        RoundStatus::NotStarted | RoundStatus::InProgress => None,
    }
}

impl From<&Round> for RoundView {
    fn from(round: &Round) -> Self {
        RoundView {
            category: round.category().to_string(),
            masked_word: masked_word(round),
            word_length: round.target_word().len() as u32,
            guessed_letters: round.guessed_letters().iter().map(|l| l.as_char()).collect(),
            wrong_guess_count: round.wrong_guess_count(),
            max_wrong_guesses: MAX_WRONG_GUESSES,
            remaining_seconds: round.remaining_seconds(),
            status: round.status(),
            keyboard: keyboard(round),
            figure: figure(round.wrong_guess_count()),
            revealed_word: round
                .is_finished()
                .then(|| round.target_word().to_string()),
            score: round.score(),
        }
    }
}
